//! Shared LLM service for the news QA pipeline.
//!
//! Provides thin clients for the supported backends (Ollama, OpenAI), a
//! profile bundle combining one generation model and one embedding model,
//! best-effort health checks, and a unified error type.
//!
//! Construct [`service_profiles::LlmServiceProfiles`] once at startup, wrap
//! it in `Arc`, and hand clones to whichever component needs text generation
//! or embeddings.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;

pub use config::llm_model_config::{GenerationParams, LlmModelConfig};
pub use config::llm_provider::LlmProvider;
pub use error_handler::LlmServiceError;
pub use service_profiles::LlmServiceProfiles;
