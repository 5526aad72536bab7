//! Universal health service for LLM backends (Ollama, OpenAI).
//!
//! Lightweight probes for the supported providers:
//! - Ollama: `GET {endpoint}/api/tags`
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a
//! `/health` endpoint. [`HealthService::check`] is resilient and never fails
//! (errors are mapped to `ok=false`).

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{LlmServiceError, Result, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g. "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe (if any).
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the main probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    #[inline]
    fn ok(
        provider: LlmProvider,
        endpoint: &str,
        model: Option<&str>,
        latency_ms: u128,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: format!("{provider:?}"),
            endpoint: endpoint.to_string(),
            model: model.map(str::to_string),
            ok: true,
            latency_ms,
            message: message.into(),
        }
    }

    #[inline]
    fn fail(
        provider: LlmProvider,
        endpoint: &str,
        model: Option<&str>,
        latency_ms: u128,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: format!("{provider:?}"),
            endpoint: endpoint.to_string(),
            model: model.map(str::to_string),
            ok: false,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A universal health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds).
    ///
    /// # Errors
    /// Returns [`LlmServiceError::HttpTransport`] if the HTTP client cannot
    /// be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self { client })
    }

    /// Checks health for a single LLM config, routing to the provider probe.
    ///
    /// This method is **resilient**: it never returns an error. Any failure
    /// is converted to `HealthStatus { ok: false, message: ... }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            warn!(
                provider = ?cfg.provider,
                endpoint = %cfg.endpoint,
                "invalid endpoint (empty or missing http/https)"
            );
            return HealthStatus::fail(
                cfg.provider,
                &cfg.endpoint,
                Some(&cfg.model),
                0,
                "invalid endpoint",
            );
        }

        let base = endpoint.trim_end_matches('/');
        let url = match cfg.provider {
            LlmProvider::Ollama => format!("{base}/api/tags"),
            LlmProvider::OpenAI => format!("{base}/v1/models"),
        };

        let started = Instant::now();
        let result = self.probe(cfg, &url).await;
        let latency_ms = started.elapsed().as_millis();

        match result {
            Ok(()) => HealthStatus::ok(
                cfg.provider,
                endpoint,
                Some(&cfg.model),
                latency_ms,
                "reachable",
            ),
            Err(e) => HealthStatus::fail(
                cfg.provider,
                endpoint,
                Some(&cfg.model),
                latency_ms,
                e.to_string(),
            ),
        }
    }

    /// Checks several configs, deduplicating identical ones.
    pub async fn check_many(&self, cfgs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        let mut out = Vec::with_capacity(cfgs.len());
        let mut seen: Vec<&LlmModelConfig> = Vec::new();
        for cfg in cfgs {
            if seen.iter().any(|c| *c == cfg) {
                continue;
            }
            seen.push(cfg);
            out.push(self.check(cfg).await);
        }
        out
    }

    async fn probe(&self, cfg: &LlmModelConfig, url: &str) -> Result<()> {
        let mut req = self.client.get(url);
        if let (LlmProvider::OpenAI, Some(key)) = (cfg.provider, cfg.api_key.as_deref()) {
            req = req.header(header::AUTHORIZATION, format!("Bearer {key}"));
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(LlmServiceError::HttpStatus {
                status,
                url: url.to_string(),
                snippet: make_snippet(&text),
            });
        }
        Ok(())
    }
}
