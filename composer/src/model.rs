//! Generation backend seam.

use std::{future::Future, pin::Pin, sync::Arc};

use llm_service::{GenerationParams, service_profiles::LlmServiceProfiles};

use crate::error::ComposerError;

/// Narrow request/response contract for text generation.
///
/// Object-safe so the composer can be tested against a scripted stand-in
/// instead of a live model server.
pub trait AnswerModel: Send + Sync {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, ComposerError>> + Send + 'a>>;
}

/// Production backend: the shared service's generation profile.
#[derive(Clone)]
pub struct ProfileAnswerModel {
    svc: Arc<LlmServiceProfiles>,
}

impl ProfileAnswerModel {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl AnswerModel for ProfileAnswerModel {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
        params: &'a GenerationParams,
    ) -> Pin<Box<dyn Future<Output = Result<String, ComposerError>> + Send + 'a>> {
        Box::pin(async move {
            self.svc
                .generate(prompt, params)
                .await
                .map_err(|e| ComposerError::Generation(e.to_string()))
        })
    }
}
