//! Unified error handling for `llm-service`.
//!
//! One top-level error type [`LlmServiceError`] for the whole crate, with
//! domain-specific errors grouped in nested enums ([`ConfigError`],
//! [`HealthError`]). Small env-var helpers return the unified [`Result<T>`]
//! alias.
//!
//! All messages carry the `[LLM Service]` prefix to simplify attribution in
//! logs.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, LlmServiceError>;

/// Top-level error for the `llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmServiceError {
    /// Configuration/validation errors (startup/readiness).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Health-check/connectivity/decoding errors.
    #[error(transparent)]
    Health(#[from] HealthError),

    /// The config passed to a service names a different provider.
    #[error("[LLM Service] invalid provider: expected {expected}, got different provider")]
    InvalidProvider {
        /// Provider the service was built for.
        expected: &'static str,
    },

    /// Invalid endpoint (empty or missing http/https).
    #[error("[LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Underlying HTTP transport error.
    #[error("[LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Non-successful HTTP status from upstream.
    #[error("[LLM Service] unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Unexpected/invalid JSON response.
    #[error("[LLM Service] failed to decode response: {0}")]
    Decode(String),
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (ports, limits, timeouts).
    #[error("[LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g. `LLM_MAX_TOKENS`, `OLLAMA_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g. `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_PROVIDER`.
    #[error("[LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),
}

/// Error enum for provider health checks.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// The endpoint is empty or does not start with http/https.
    #[error("[LLM Service] invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("[LLM Service] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        status: StatusCode,
        url: String,
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[LLM Service] decode error: {0}")]
    Decode(String),
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a
/// valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u32>().map(Some).map_err(|_| {
            LlmServiceError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Trims a response body to a short, log-friendly snippet.
pub(crate) fn make_snippet(body: &str) -> String {
    body.chars().take(240).collect()
}
