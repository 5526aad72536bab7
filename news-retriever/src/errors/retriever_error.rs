//! Unified error type for the news-retriever crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the retrieval module.
#[derive(Debug, Error)]
pub enum RetrieverError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Corpus loading ───────────────────────────────────────────────────────
    /// The corpus file does not exist. Fatal: no query can proceed without data.
    #[error("corpus file not found: {path}")]
    CorpusMissing { path: PathBuf },

    /// The top-level JSON shape is neither a ticker map nor a flat list.
    #[error("unsupported JSON format: expected object of ticker -> items or a flat list")]
    UnsupportedFormat,

    // ── I/O & filesystem ────────────────────────────────────────────────────
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // ── JSON / serialization ────────────────────────────────────────────────
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Cache files ─────────────────────────────────────────────────────────
    /// Binary (de)serialization error for cached matrix/index files.
    #[error("cache codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// A loaded cache does not line up with the current corpus.
    #[error(
        "cached embeddings do not match the corpus: {rows} matrix rows for {records} records; \
         delete the cache directory and rebuild"
    )]
    CacheMismatch { records: usize, rows: usize },

    // ── Embeddings backend ──────────────────────────────────────────────────
    /// Embedding backend failed to embed inputs.
    #[error("embedding error: {0}")]
    Embedding(String),

    // ── Modes ───────────────────────────────────────────────────────────────
    /// A mode string outside {"concise", "detailed"}.
    #[error("unknown answer mode: '{0}' (expected 'concise' or 'detailed')")]
    UnknownMode(String),
}
