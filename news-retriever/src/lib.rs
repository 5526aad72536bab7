//! Financial-news retrieval: corpus loading, cached embeddings, an exact
//! flat vector index, and mode-aware ranking.
//!
//! The crate owns everything between "a JSON file of articles" and "a ranked
//! list of source documents for a query". Embedding generation itself is
//! delegated through the [`embed::TextEmbedder`] seam so the index logic
//! stays independent of any concrete provider.

pub mod cache;
pub mod corpus;
pub mod embed;
pub mod errors;
pub mod index;
pub mod mode;
pub mod progress;
pub mod retrieve;
pub mod structs;

use std::sync::Arc;

use tracing::{debug, info};

pub use crate::embed::TextEmbedder;
pub use crate::errors::retriever_error::RetrieverError;
pub use crate::mode::AnswerMode;
pub use crate::progress::{IndicatifProgress, NoopProgress, Progress};
pub use crate::structs::record::{NewsRecord, RetrievedDocument};
pub use crate::structs::retriever_config::RetrieverConfig;

/// Ready-to-query retriever: loaded corpus, embedding matrix and flat index.
///
/// Construction is the expensive step (first run embeds the whole corpus);
/// queries afterwards are a single embedding call plus an in-memory scan.
pub struct Retriever {
    cfg: RetrieverConfig,
    corpus: corpus::Corpus,
    embeddings: Vec<Vec<f32>>,
    index: index::FlatIndex,
    embedder: Arc<dyn TextEmbedder>,
}

impl Retriever {
    /// Loads the corpus and the embedding cache, building both cache files
    /// when absent.
    ///
    /// # Errors
    /// Propagates corpus, cache and embedding failures; an empty corpus is
    /// not an error (queries will simply return no documents).
    pub async fn open(
        cfg: RetrieverConfig,
        embedder: Arc<dyn TextEmbedder>,
        progress: &dyn Progress,
    ) -> Result<Self, RetrieverError> {
        let corpus = corpus::load_corpus(&cfg.data_path)?;

        let (embeddings, index) = if corpus.is_empty() {
            (Vec::new(), index::FlatIndex::build(&[])?)
        } else {
            cache::load_or_build(&cfg, &corpus.texts, embedder.as_ref(), progress).await?
        };

        info!(
            target: "retriever",
            records = corpus.len(),
            dim = index.dim(),
            "retriever ready"
        );

        Ok(Self {
            cfg,
            corpus,
            embeddings,
            index,
            embedder,
        })
    }

    /// Number of documents available for retrieval.
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Configured default result count.
    pub fn top_k(&self) -> usize {
        self.cfg.top_k
    }

    /// Embeds `query` and returns mode-filtered documents, best first.
    ///
    /// A blank query or an empty index yields an empty result rather than an
    /// error. Reported scores are cosine similarities, so thresholds behave
    /// the same whatever the embedding dimensionality.
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        mode: AnswerMode,
    ) -> Result<Vec<RetrievedDocument>, RetrieverError> {
        if query.trim().is_empty() || self.index.is_empty() {
            debug!(target: "retriever::search", "blank query or empty index, nothing to rank");
            return Ok(Vec::new());
        }

        let queries = [query.to_string()];
        let mut vectors = self.embedder.embed_batch(&queries).await?;
        let query_vec = vectors.pop().ok_or_else(|| {
            RetrieverError::Embedding("backend returned no vector for the query".into())
        })?;

        let candidates = self.index.search(&query_vec, top_k);
        let results = retrieve::rank_candidates(
            &query_vec,
            &candidates,
            &self.corpus.records,
            &self.embeddings,
            top_k,
            mode,
        );

        debug!(
            target: "retriever::search",
            mode = %mode,
            candidates = candidates.len(),
            kept = results.len(),
            "query ranked"
        );

        Ok(results)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic embedding stand-in shared across unit tests.

    use std::{future::Future, pin::Pin};

    use crate::embed::TextEmbedder;
    use crate::errors::retriever_error::RetrieverError;

    /// Embeds text as occurrence counts of three fixed keywords, giving a
    /// 3-dimensional space with fully predictable cosine geometry.
    pub struct KeywordEmbedder;

    const AXES: [&str; 3] = ["apple", "bank", "energy"];

    fn count(haystack: &str, needle: &str) -> f32 {
        haystack.to_lowercase().matches(needle).count() as f32
    }

    impl TextEmbedder for KeywordEmbedder {
        fn embed_batch<'a>(
            &'a self,
            texts: &'a [String],
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Vec<f32>>, RetrieverError>> + Send + 'a>>
        {
            Box::pin(async move {
                Ok(texts
                    .iter()
                    .map(|t| AXES.iter().map(|axis| count(t, axis)).collect())
                    .collect())
            })
        }
    }
}
