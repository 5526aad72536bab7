use news_retriever::RetrievedDocument;
use serde::{Deserialize, Serialize};

/// Request payload for /ask.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural language question about the news corpus.
    pub query: String,
    /// Response policy, "concise" (default) or "detailed".
    #[serde(default)]
    pub mode: Option<String>,
    /// Optional override: number of candidates fetched from the index.
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Response payload for /ask.
///
/// Always returned with status 200; failures are reported as text in
/// `answer` with an empty source list, so the chat UI renders them like any
/// other reply.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Final answer text (or an error/fallback message).
    pub answer: String,
    /// Documents the answer was grounded on.
    pub sources: Vec<RetrievedDocument>,
}

impl AskResponse {
    /// Response carrying only a message, no sources.
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            answer: text.into(),
            sources: Vec::new(),
        }
    }
}
