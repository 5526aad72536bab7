//! Embedding provider seam.
//!
//! Async is required because real providers (Ollama, OpenAI) perform HTTP
//! requests. The trait is object-safe so the retriever can hold any backend,
//! and so tests can plug in a deterministic stand-in.

use std::{future::Future, pin::Pin};

use crate::errors::retriever_error::RetrieverError;

/// Provider interface for embedding generation.
///
/// `embed_batch` must return one fixed-width vector per input text, in input
/// order. Corpus construction and query embedding both go through this single
/// contract, which keeps query and document vectors in the same space.
pub trait TextEmbedder: Send + Sync {
    /// Async batched embedding.
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RetrieverError>> + Send + 'a>>;
}

pub mod llm;
