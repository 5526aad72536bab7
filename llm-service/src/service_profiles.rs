//! Shared LLM service with two active profiles: `generation` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Provides convenience methods to generate text and compute embeddings.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use llm_service::service_profiles::LlmServiceProfiles;
//! use llm_service::{GenerationParams, LlmModelConfig, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), llm_service::LlmServiceError> {
//!     let generation = LlmModelConfig {
//!         provider: LlmProvider::Ollama,
//!         model: "qwen3:4b".into(),
//!         endpoint: "http://localhost:11434".into(),
//!         api_key: None,
//!         max_tokens: Some(512),
//!         temperature: None,
//!         top_p: None,
//!         timeout_secs: Some(120),
//!     };
//!     let embedding = LlmModelConfig {
//!         model: "nomic-embed-text".into(),
//!         ..generation.clone()
//!     };
//!
//!     let svc = Arc::new(LlmServiceProfiles::new(generation, embedding, Some(10))?);
//!
//!     let txt = svc.generate("Hello world", &GenerationParams::deterministic(60)).await?;
//!     println!("{txt}");
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("dim = {}", emb.len());
//!     Ok(())
//! }
//! ```

use crate::config::default_config::{config_embedding, config_generation};
use crate::config::llm_model_config::{GenerationParams, LlmModelConfig};
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{LlmServiceError, Result};
use crate::health_service::{HealthService, HealthStatus};
use crate::services::ollama_service::OllamaService;
use crate::services::open_ai_service::OpenAiService;

/// Provider-dispatching client for one profile.
enum ProfileClient {
    Ollama(OllamaService),
    OpenAi(OpenAiService),
}

impl ProfileClient {
    fn build(cfg: LlmModelConfig) -> Result<Self> {
        match cfg.provider {
            LlmProvider::Ollama => Ok(Self::Ollama(OllamaService::new(cfg)?)),
            LlmProvider::OpenAI => Ok(Self::OpenAi(OpenAiService::new(cfg)?)),
        }
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        match self {
            Self::Ollama(svc) => svc.generate(prompt, params).await,
            Self::OpenAi(svc) => svc.generate(prompt, params).await,
        }
    }

    async fn embeddings(&self, input: &str) -> Result<Vec<f32>> {
        match self {
            Self::Ollama(svc) => svc.embeddings(input).await,
            Self::OpenAi(svc) => svc.embeddings(input).await,
        }
    }
}

/// Shared service managing the **generation** and **embedding** profiles.
///
/// Clients are built eagerly at construction; the profiles are immutable for
/// the lifetime of the service.
pub struct LlmServiceProfiles {
    generation_cfg: LlmModelConfig,
    embedding_cfg: LlmModelConfig,

    generation: ProfileClient,
    embedding: ProfileClient,

    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates a new service from explicit configs.
    ///
    /// # Errors
    /// Returns [`LlmServiceError`] if either client fails validation.
    pub fn new(
        generation: LlmModelConfig,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self> {
        Ok(Self {
            generation: ProfileClient::build(generation.clone())?,
            embedding: ProfileClient::build(embedding.clone())?,
            generation_cfg: generation,
            embedding_cfg: embedding,
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Creates a service with both profiles resolved from the environment.
    ///
    /// See [`crate::config::default_config`] for the variables involved.
    pub fn from_env() -> Result<Self> {
        Self::new(config_generation()?, config_embedding()?, Some(10))
    }

    /// Generates text using the **generation** profile.
    ///
    /// # Errors
    /// Returns [`LlmServiceError`] if generation fails.
    pub async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.generation.generate(prompt, params).await
    }

    /// Computes an embedding vector using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`LlmServiceError`] if embedding fails.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>> {
        self.embedding.embeddings(input).await
    }

    /// Returns a health snapshot for the distinct profiles.
    ///
    /// If the embedding profile equals the generation profile it is checked
    /// only once.
    pub async fn health_all(&self) -> Result<Vec<HealthStatus>> {
        let mut list = Vec::with_capacity(2);
        list.push(self.generation_cfg.clone());
        if self.embedding_cfg != self.generation_cfg {
            list.push(self.embedding_cfg.clone());
        }
        Ok(self.health.check_many(&list).await)
    }

    /// Returns references to the current profiles `(generation, embedding)`.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.generation_cfg, &self.embedding_cfg)
    }
}
