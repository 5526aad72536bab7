use crate::config::llm_provider::LlmProvider;

/// Configuration for one LLM model (generation or embedding).
///
/// # Fields
///
/// - `provider`: which backend to call (Ollama, OpenAI).
/// - `model`: model identifier (e.g. `"flan-t5-small"`, `"nomic-embed-text"`).
/// - `endpoint`: inference endpoint (local server or remote API URL).
/// - `api_key`: optional key for providers that require authentication.
/// - `max_tokens`: default maximum number of tokens to generate.
/// - `temperature`: default sampling temperature (0.0 = deterministic).
/// - `top_p`: default nucleus sampling cutoff.
/// - `timeout_secs`: optional request timeout in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Inference endpoint (local URL or remote API URL).
    pub endpoint: String,

    /// Optional API key for authentication (e.g. OpenAI).
    pub api_key: Option<String>,

    /// Default maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Default sampling temperature.
    pub temperature: Option<f32>,

    /// Default nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

/// Per-call sampling overrides for a single generation request.
///
/// A `None` field falls back to the value from [`LlmModelConfig`]. The answer
/// composer uses this to switch between deterministic one-liner generation
/// and sampled multi-sentence generation without rebuilding clients.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    /// Upper bound on newly generated tokens.
    pub max_new_tokens: Option<u32>,
    /// Sampling temperature; `Some(0.0)` forces greedy decoding.
    pub temperature: Option<f32>,
    /// Nucleus sampling cutoff.
    pub top_p: Option<f32>,
}

impl GenerationParams {
    /// Deterministic decoding with a token budget (no sampling).
    pub fn deterministic(max_new_tokens: u32) -> Self {
        Self {
            max_new_tokens: Some(max_new_tokens),
            temperature: Some(0.0),
            top_p: None,
        }
    }

    /// Stochastic decoding with fixed nucleus-sampling parameters.
    pub fn sampled(max_new_tokens: u32, temperature: f32, top_p: f32) -> Self {
        Self {
            max_new_tokens: Some(max_new_tokens),
            temperature: Some(temperature),
            top_p: Some(top_p),
        }
    }

    /// Effective token budget given the model config defaults.
    pub fn resolve_max_tokens(&self, cfg: &LlmModelConfig) -> Option<u32> {
        self.max_new_tokens.or(cfg.max_tokens)
    }

    /// Effective temperature given the model config defaults.
    pub fn resolve_temperature(&self, cfg: &LlmModelConfig) -> Option<f32> {
        self.temperature.or(cfg.temperature)
    }

    /// Effective top_p given the model config defaults.
    pub fn resolve_top_p(&self, cfg: &LlmModelConfig) -> Option<f32> {
        self.top_p.or(cfg.top_p)
    }
}
