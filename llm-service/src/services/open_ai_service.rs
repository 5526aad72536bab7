//! OpenAI service for text generation and embeddings.
//!
//! Minimal, non-streaming client around the OpenAI REST API. Endpoints are
//! derived from `LlmModelConfig::endpoint`:
//! - `POST {endpoint}/v1/chat/completions` — chat completion (non-streaming)
//! - `POST {endpoint}/v1/embeddings`       — embeddings retrieval
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::OpenAI`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::llm_model_config::{GenerationParams, LlmModelConfig};
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{ConfigError, LlmServiceError, Result, make_snippet};

/// Thin client for the OpenAI API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    url_embeddings: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`LlmServiceError::InvalidProvider`] if `cfg.provider` is not OpenAI
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is `None`
    /// - [`LlmServiceError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmServiceError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        if cfg.provider != LlmProvider::OpenAI {
            return Err(LlmServiceError::InvalidProvider { expected: "OpenAI" });
        }

        let api_key = cfg
            .api_key
            .clone()
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(LlmServiceError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| LlmServiceError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/v1/chat/completions", base);
        let url_embeddings = format!("{}/v1/embeddings", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            url_embeddings,
        })
    }

    /// Performs a **non-streaming** chat completion (`/v1/chat/completions`).
    ///
    /// The prompt is sent as a single user message; sampling options come
    /// from `params` with config defaults as fallback.
    ///
    /// # Errors
    /// - [`LlmServiceError::HttpStatus`] for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client/network failures
    /// - [`LlmServiceError::Decode`] if the JSON cannot be parsed or no
    ///   choices are returned
    pub async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, params);

        debug!(
            model = %self.cfg.model,
            prompt_len = prompt.len(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmServiceError::HttpStatus {
                status,
                url,
                snippet: make_snippet(&text),
            });
        }

        let out: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| LlmServiceError::Decode(format!("serde error: {e}")))?;

        let text = out
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmServiceError::Decode("empty choices in response".into()))?;

        debug!(
            latency_ms = started.elapsed().as_millis() as u64,
            "chat completion finished"
        );

        Ok(text)
    }

    /// Retrieves a single embeddings vector (`/v1/embeddings`).
    ///
    /// # Errors
    /// - [`LlmServiceError::HttpStatus`] for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client/network failures
    /// - [`LlmServiceError::Decode`] if the JSON cannot be parsed or no data
    ///   rows are returned
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        debug!(model = %self.cfg.model, "POST {}", self.url_embeddings);
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

        let out: EmbeddingsResponse = resp
            .json()
            .await
            .map_err(|e| LlmServiceError::Decode(format!("serde error: {e}")))?;

        out.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LlmServiceError::Decode("empty data in embeddings response".into()))
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, params: &GenerationParams) -> Self {
        Self {
            model: &cfg.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: params.resolve_max_tokens(cfg),
            temperature: params.resolve_temperature(cfg),
            top_p: params.resolve_top_p(cfg),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingRow>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}
