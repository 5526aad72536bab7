//! Data types for the news corpus and retrieval results.

use serde::{Deserialize, Serialize};

/// One normalized news article. Created once at corpus load, immutable for
/// the lifetime of the process, and index-aligned 1:1 with the embedding
/// matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    /// Stock ticker the article belongs to (map key or explicit field).
    pub ticker: String,
    /// Article headline.
    pub title: String,
    /// Canonical URL.
    pub link: String,
    /// Article body. Non-empty by construction: empty-text items are dropped
    /// at load time.
    pub full_text: String,
}

/// A single retrieval hit, produced per query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub title: String,
    pub link: String,
    pub ticker: String,
    /// Truncated prefix of `full_text` used for prompting and display.
    pub snippet: String,
    /// Row into the corpus / embedding matrix.
    pub index: usize,
    /// Cosine similarity between the normalized query and document vectors.
    pub score: f32,
}
