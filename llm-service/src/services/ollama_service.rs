//! Lightweight Ollama service for text generation and embeddings.
//!
//! Thin client for the local Ollama API:
//! - `POST {endpoint}/api/generate`   — synchronous text generation (`stream=false`)
//! - `POST {endpoint}/api/embeddings` — embeddings retrieval
//!
//! Uses the universal configuration [`LlmModelConfig`] and ensures the
//! selected provider is [`LlmProvider::Ollama`]. Generation accepts per-call
//! [`GenerationParams`] so callers can switch sampling per request.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::llm_model_config::{GenerationParams, LlmModelConfig};
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{LlmServiceError, Result, make_snippet};

/// Thin client for Ollama.
///
/// Initialized with a full [`LlmModelConfig`]. Reuses an HTTP client with a
/// configurable timeout.
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embeddings: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`LlmServiceError::InvalidProvider`] if `cfg.provider` is not `Ollama`
    /// - [`LlmServiceError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmServiceError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(LlmServiceError::InvalidProvider { expected: "Ollama" });
        }

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(LlmServiceError::InvalidEndpoint(cfg.endpoint));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{}/api/generate", base);
        let url_embeddings = format!("{}/api/embeddings", base);

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** generation request via `/api/generate`.
    ///
    /// Mapped options:
    /// - `model`        ← `self.cfg.model`
    /// - `prompt`       ← argument
    /// - `num_predict`  ← `params.max_new_tokens` or config default
    /// - `temperature`  ← `params.temperature` or config default
    /// - `top_p`        ← `params.top_p` or config default
    ///
    /// # Errors
    /// - [`LlmServiceError::HttpStatus`] for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client errors
    /// - [`LlmServiceError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let body = GenerateRequest::from_cfg(&self.cfg, prompt, params);

        debug!("POST {}", self.url_generate);
        let resp = self
            .client
            .post(&self.url_generate)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmServiceError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            LlmServiceError::Decode(format!("serde error: {e}; ensure `stream=false` is used"))
        })?;

        Ok(out.response)
    }

    /// Retrieves embeddings via `/api/embeddings`.
    ///
    /// # Errors
    /// - [`LlmServiceError::HttpStatus`] for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client errors
    /// - [`LlmServiceError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };

        debug!("POST {}", self.url_embeddings);
        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmServiceError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            LlmServiceError::Decode(format!(
                "serde error: {e}; expected `{{ \"embedding\": number[] }}`"
            ))
        })?;

        Ok(out.embedding)
    }
}

/* ==========================
HTTP payloads & options
========================== */

/// Request body for `/api/generate` (non-streaming).
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

impl<'a> GenerateRequest<'a> {
    /// Builds a request from config, prompt, and per-call overrides.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, params: &GenerationParams) -> Self {
        let options = GenerateOptions {
            temperature: params.resolve_temperature(cfg),
            top_p: params.resolve_top_p(cfg),
            num_predict: params.resolve_max_tokens(cfg),
        };

        Self {
            model: &cfg.model,
            prompt,
            stream: false,
            options: Some(options),
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response body for `/api/generate`. The generated text is in `response`.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Request body for `/api/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

/// Response body for `/api/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}
