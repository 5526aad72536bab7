//! Configuration layer: reads runtime settings from environment variables
//! and exposes a strongly typed config for corpus, cache, and search knobs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::retriever_error::RetrieverError;

/// Runtime configuration for the retriever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// Input JSON corpus (ticker map or flat list of articles).
    pub data_path: PathBuf,
    /// Directory holding the persisted embedding matrix and index files.
    pub cache_dir: PathBuf,
    /// Number of texts sent to the embedding backend per call. Purely an
    /// efficiency knob; does not affect results.
    pub batch_size: usize,
    /// Default top-k candidates fetched per query.
    pub top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/stock_news.json"),
            cache_dir: PathBuf::from("cache"),
            batch_size: 64,
            top_k: 3,
        }
    }
}

impl RetrieverConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `NEWS_DATA_PATH` (default: "data/stock_news.json")
    /// - `CACHE_DIR` (default: "cache")
    /// - `EMBED_BATCH_SIZE` (default: 64)
    /// - `RAG_TOP_K` (default: 3)
    pub fn from_env() -> Result<Self, RetrieverError> {
        let data_path = std::env::var("NEWS_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/stock_news.json"));

        let cache_dir = std::env::var("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cache"));

        let batch_size = read_usize_env("EMBED_BATCH_SIZE")?.unwrap_or(64);
        let top_k = read_usize_env("RAG_TOP_K")?.unwrap_or(3);

        if batch_size == 0 {
            return Err(RetrieverError::InvalidConfig(
                "EMBED_BATCH_SIZE must be > 0".into(),
            ));
        }
        if top_k == 0 {
            return Err(RetrieverError::InvalidConfig("RAG_TOP_K must be > 0".into()));
        }

        Ok(Self {
            data_path,
            cache_dir,
            batch_size,
            top_k,
        })
    }
}

/// Read an optional `usize` from env (`Ok(None)` if unset).
fn read_usize_env(key: &str) -> Result<Option<usize>, RetrieverError> {
    match std::env::var(key) {
        Ok(v) => v
            .parse::<usize>()
            .map(Some)
            .map_err(|_| RetrieverError::EnvParse {
                key: key.into(),
                value: v,
            }),
        Err(_) => Ok(None),
    }
}
