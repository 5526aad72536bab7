//! Answer composition: turn ranked news documents into a prompt and return
//! the model's answer.
//!
//! The composer owns the text-side policy (boilerplate cleaning, context
//! layout, mode-specific instructions and sampling parameters, echo
//! stripping); the generation call itself goes through the [`AnswerModel`]
//! seam.

pub mod clean;
pub mod error;
pub mod model;
pub mod prompt;

use std::sync::Arc;

use llm_service::GenerationParams;
use news_retriever::{AnswerMode, RetrievedDocument};
use tracing::{debug, info};

pub use crate::clean::clean_snippet;
pub use crate::error::ComposerError;
pub use crate::model::{AnswerModel, ProfileAnswerModel};

/// Returned when every retrieved document cleans to empty text.
pub const NO_CONTEXT_FALLBACK: &str = "Sorry, I couldn't find meaningful news for that query.";

/// Concise mode: deterministic, one short sentence.
const CONCISE_MAX_NEW_TOKENS: u32 = 60;
/// Detailed mode: sampled paragraph synthesis.
const DETAILED_MAX_NEW_TOKENS: u32 = 500;
const DETAILED_TEMPERATURE: f32 = 0.7;
const DETAILED_TOP_P: f32 = 0.9;

/// Mode-aware answer generator over an injected model backend.
pub struct Composer {
    model: Arc<dyn AnswerModel>,
}

impl Composer {
    pub fn new(model: Arc<dyn AnswerModel>) -> Self {
        Self { model }
    }

    /// Generates an answer for `query` from ranked `documents`.
    ///
    /// When no document survives cleaning the fixed fallback string is
    /// returned and the model is never invoked. If the model echoes the
    /// context block at the start of its output, that prefix is stripped.
    pub async fn generate(
        &self,
        query: &str,
        documents: &[RetrievedDocument],
        mode: AnswerMode,
    ) -> Result<String, ComposerError> {
        let Some(context) = prompt::build_context(documents, mode) else {
            info!(
                target: "composer",
                docs = documents.len(),
                "no usable context after cleaning, returning fallback"
            );
            return Ok(NO_CONTEXT_FALLBACK.to_string());
        };

        let params = match mode {
            AnswerMode::Concise => GenerationParams::deterministic(CONCISE_MAX_NEW_TOKENS),
            AnswerMode::Detailed => GenerationParams::sampled(
                DETAILED_MAX_NEW_TOKENS,
                DETAILED_TEMPERATURE,
                DETAILED_TOP_P,
            ),
        };

        let prompt = prompt::build_prompt(query, &context, mode);
        debug!(
            target: "composer",
            mode = %mode,
            prompt_chars = prompt.len(),
            "submitting prompt"
        );

        let raw = self.model.generate(&prompt, &params).await?;
        Ok(strip_context_echo(raw.trim(), &context))
    }
}

/// Drops a leading verbatim copy of the context from the model output.
fn strip_context_echo(text: &str, context: &str) -> String {
    match text.strip_prefix(context) {
        Some(rest) => rest.trim().to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::{future::Future, pin::Pin};

    /// Scripted backend: records calls, returns a fixed reply.
    struct ScriptedModel {
        reply: String,
        calls: Mutex<Vec<(String, GenerationParams)>>,
    }

    impl ScriptedModel {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, GenerationParams)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AnswerModel for ScriptedModel {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
            params: &'a GenerationParams,
        ) -> Pin<Box<dyn Future<Output = Result<String, ComposerError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap()
                    .push((prompt.to_string(), *params));
                Ok(self.reply.clone())
            })
        }
    }

    fn doc(snippet: &str) -> RetrievedDocument {
        RetrievedDocument {
            title: "Apple earnings".into(),
            link: "https://example.com/a".into(),
            ticker: "AAPL".into(),
            snippet: snippet.into(),
            index: 0,
            score: 0.8,
        }
    }

    #[tokio::test]
    async fn empty_documents_fall_back_without_model_call() {
        let model = ScriptedModel::new("should never be used");
        let composer = Composer::new(model.clone());

        let answer = composer
            .generate("anything", &[], AnswerMode::Concise)
            .await
            .unwrap();

        assert_eq!(answer, NO_CONTEXT_FALLBACK);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn pure_boilerplate_falls_back_without_model_call() {
        let model = ScriptedModel::new("should never be used");
        let composer = Composer::new(model.clone());

        let docs = vec![doc("Sign in Upgrade subscribe")];
        let answer = composer
            .generate("anything", &docs, AnswerMode::Detailed)
            .await
            .unwrap();

        assert_eq!(answer, NO_CONTEXT_FALLBACK);
        assert!(model.calls().is_empty());
    }

    #[tokio::test]
    async fn concise_mode_uses_deterministic_params() {
        let model = ScriptedModel::new("Apple beat expectations.");
        let composer = Composer::new(model.clone());

        let docs = vec![doc("Apple beat revenue expectations this quarter.")];
        let answer = composer
            .generate("How did Apple do?", &docs, AnswerMode::Concise)
            .await
            .unwrap();

        assert_eq!(answer, "Apple beat expectations.");
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, GenerationParams::deterministic(60));
        assert!(calls[0].0.contains("Question: How did Apple do?"));
        assert!(calls[0].0.ends_with("Answer:"));
    }

    #[tokio::test]
    async fn detailed_mode_uses_sampled_params_and_titled_context() {
        let model = ScriptedModel::new("A paragraph.");
        let composer = Composer::new(model.clone());

        let docs = vec![doc("Apple beat revenue expectations this quarter.")];
        composer
            .generate("How did Apple do?", &docs, AnswerMode::Detailed)
            .await
            .unwrap();

        let calls = model.calls();
        assert_eq!(calls[0].1, GenerationParams::sampled(500, 0.7, 0.9));
        assert!(calls[0]
            .0
            .contains("[1] Apple earnings: Apple beat revenue expectations this quarter."));
    }

    #[tokio::test]
    async fn echoed_context_prefix_is_stripped() {
        let context = "Apple beat revenue expectations this quarter.";
        let model = ScriptedModel::new(&format!("{context} The answer itself."));
        let composer = Composer::new(model);

        let docs = vec![doc(context)];
        let answer = composer
            .generate("How did Apple do?", &docs, AnswerMode::Concise)
            .await
            .unwrap();

        assert_eq!(answer, "The answer itself.");
    }
}
