//! Embedding provider backed by the shared LLM service profiles.

use std::sync::Arc;

use llm_service::service_profiles::LlmServiceProfiles;

use crate::embed::TextEmbedder;
use crate::errors::retriever_error::RetrieverError;

/// Embedder that forwards every text to the service's embedding profile.
#[derive(Clone)]
pub struct ProfileEmbedder {
    svc: Arc<LlmServiceProfiles>,
}

impl ProfileEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl TextEmbedder for ProfileEmbedder {
    fn embed_batch<'a>(
        &'a self,
        texts: &'a [String],
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<Vec<f32>>, RetrieverError>> + Send + 'a>,
    > {
        Box::pin(async move {
            let mut out = Vec::with_capacity(texts.len());
            for text in texts {
                let vec = self
                    .svc
                    .embed(text)
                    .await
                    .map_err(|e| RetrieverError::Embedding(e.to_string()))?;
                out.push(vec);
            }
            Ok(out)
        })
    }
}
