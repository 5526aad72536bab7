//! Error type for answer composition.

use thiserror::Error;

/// Errors produced while composing an answer.
#[derive(Debug, Error)]
pub enum ComposerError {
    /// The generation backend failed to produce text.
    #[error("generation error: {0}")]
    Generation(String),
}
