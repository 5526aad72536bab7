//! Default LLM configs loaded strictly from environment variables.
//!
//! Convenience constructors for [`LlmModelConfig`], grouped by role:
//!
//! - **Generation** → the sequence-to-sequence model that writes answers
//! - **Embedding**  → the sentence-embedding model used for retrieval
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER` = provider kind (`ollama` default, `openai`)
//! - `LLM_MAX_TOKENS` = optional default max tokens (u32)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//!
//! OpenAI-specific:
//! - `OPENAI_URL` = endpoint (default `https://api.openai.com`)
//! - `OPENAI_API_KEY` = key (mandatory)
//!
//! Role-specific:
//! - `GENERATION_MODEL` = generation model name (mandatory)
//! - `EMBEDDING_MODEL`  = embedding model name (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, LlmServiceError, env_opt_u32, must_env},
};

/// Resolves the provider kind from `LLM_PROVIDER` (default: Ollama).
fn provider_kind() -> Result<LlmProvider, LlmServiceError> {
    match std::env::var("LLM_PROVIDER") {
        Ok(v) => match v.trim().to_lowercase().as_str() {
            "" | "ollama" => Ok(LlmProvider::Ollama),
            "openai" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        },
        Err(_) => Ok(LlmProvider::Ollama),
    }
}

/// Resolves the backend endpoint for the selected provider.
///
/// Ollama precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if no endpoint can be resolved
/// - [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is invalid
fn endpoint_for(provider: LlmProvider) -> Result<String, LlmServiceError> {
    match provider {
        LlmProvider::Ollama => {
            if let Ok(url) = std::env::var("OLLAMA_URL") {
                if !url.trim().is_empty() {
                    return Ok(url);
                }
            }
            if let Ok(port) = std::env::var("OLLAMA_PORT") {
                if !port.trim().is_empty() {
                    let _ = port
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidNumber {
                            var: "OLLAMA_PORT",
                            reason: "expected u16 (1..=65535)",
                        })?;
                    return Ok(format!("http://localhost:{port}"));
                }
            }
            Err(LlmServiceError::Config(ConfigError::MissingVar(
                "OLLAMA_URL or OLLAMA_PORT",
            )))
        }
        LlmProvider::OpenAI => Ok(std::env::var("OPENAI_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://api.openai.com".to_string())),
    }
}

fn api_key_for(provider: LlmProvider) -> Result<Option<String>, LlmServiceError> {
    match provider {
        LlmProvider::Ollama => Ok(None),
        LlmProvider::OpenAI => must_env("OPENAI_API_KEY").map(Some),
    }
}

/// Constructs the config for the **generation** model.
///
/// # Env
/// - `GENERATION_MODEL` (required)
/// - `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = None` (per-call [`GenerationParams`] decide sampling)
/// - `timeout_secs = Some(120)`
///
/// [`GenerationParams`]: crate::config::llm_model_config::GenerationParams
pub fn config_generation() -> Result<LlmModelConfig, LlmServiceError> {
    let provider = provider_kind()?;
    let endpoint = endpoint_for(provider)?;
    let model = must_env("GENERATION_MODEL")?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: api_key_for(provider)?,
        max_tokens,
        temperature: None,
        top_p: None,
        timeout_secs: Some(120),
    })
}

/// Constructs the config for the **embedding** model.
///
/// # Env
/// - `EMBEDDING_MODEL` (required)
///
/// # Defaults
/// - `temperature = Some(0.0)` (deterministic)
/// - `timeout_secs = Some(30)`
pub fn config_embedding() -> Result<LlmModelConfig, LlmServiceError> {
    let provider = provider_kind()?;
    let endpoint = endpoint_for(provider)?;
    let model = must_env("EMBEDDING_MODEL")?;

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: api_key_for(provider)?,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
