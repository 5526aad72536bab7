//! On-disk embedding cache: a persisted embedding matrix plus a persisted
//! flat index, keyed by the corpus base filename.
//!
//! The cache is valid only when both files exist; there is no content hash or
//! schema version, so editing the corpus (or switching embedding models)
//! requires deleting the cache directory by hand. The only check performed on
//! load is the row-count alignment against the current corpus.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::embed::TextEmbedder;
use crate::errors::retriever_error::RetrieverError;
use crate::index::FlatIndex;
use crate::progress::Progress;
use crate::structs::retriever_config::RetrieverConfig;

/// Pair of cache files derived from the corpus filename.
#[derive(Debug, Clone)]
pub struct CachePaths {
    /// Bincode-serialized `Vec<Vec<f32>>` embedding matrix.
    pub embeddings: PathBuf,
    /// Bincode-serialized [`FlatIndex`].
    pub index: PathBuf,
}

impl CachePaths {
    /// Derives `<stem>_embeddings.bin` / `<stem>_index.bin` under `cache_dir`.
    pub fn for_corpus(cache_dir: &Path, corpus_path: &Path) -> Self {
        let stem = corpus_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("corpus");
        Self {
            embeddings: cache_dir.join(format!("{stem}_embeddings.bin")),
            index: cache_dir.join(format!("{stem}_index.bin")),
        }
    }

    /// Cache is usable only when both files are present.
    pub fn is_valid(&self) -> bool {
        self.embeddings.exists() && self.index.exists()
    }
}

/// Loads the cached matrix and index, or computes and persists them.
///
/// On a cache miss, every document text is embedded in `cfg.batch_size`
/// batches through `embedder`, the stacked matrix is written to disk, and a
/// fresh [`FlatIndex`] is built and persisted alongside it.
///
/// # Errors
/// - [`RetrieverError::Embedding`] if the backend fails
/// - [`RetrieverError::Codec`] / [`RetrieverError::Io`] on cache file problems
/// - [`RetrieverError::CacheMismatch`] if a loaded matrix does not have one
///   row per document text
pub async fn load_or_build(
    cfg: &RetrieverConfig,
    texts: &[String],
    embedder: &dyn TextEmbedder,
    progress: &dyn Progress,
) -> Result<(Vec<Vec<f32>>, FlatIndex), RetrieverError> {
    let paths = CachePaths::for_corpus(&cfg.cache_dir, &cfg.data_path);

    if paths.is_valid() {
        info!(
            target: "retriever::cache",
            embeddings = %paths.embeddings.display(),
            index = %paths.index.display(),
            "loading cached embeddings and index"
        );
        let matrix = load_matrix(&paths.embeddings)?;
        let index = FlatIndex::load(&paths.index)?;

        if matrix.len() != texts.len() {
            return Err(RetrieverError::CacheMismatch {
                records: texts.len(),
                rows: matrix.len(),
            });
        }
        return Ok((matrix, index));
    }

    info!(
        target: "retriever::cache",
        docs = texts.len(),
        batch_size = cfg.batch_size,
        "no cached files found, building new index"
    );

    fs::create_dir_all(&cfg.cache_dir)?;

    let batches = texts.len().div_ceil(cfg.batch_size).max(1) as u64;
    progress.set_total(batches);

    let mut matrix: Vec<Vec<f32>> = Vec::with_capacity(texts.len());
    for chunk in texts.chunks(cfg.batch_size) {
        let vectors = embedder.embed_batch(chunk).await?;
        if vectors.len() != chunk.len() {
            warn!(
                target: "retriever::cache",
                expected = chunk.len(),
                got = vectors.len(),
                "embedding backend returned a short batch"
            );
            return Err(RetrieverError::Embedding(format!(
                "backend returned {} vectors for {} texts",
                vectors.len(),
                chunk.len()
            )));
        }
        matrix.extend(vectors);
        progress.step("embedding corpus");
    }

    save_matrix(&paths.embeddings, &matrix)?;

    progress.message("building index");
    let index = FlatIndex::build(&matrix)?;
    index.save(&paths.index)?;
    progress.finish("index ready");

    info!(
        target: "retriever::cache",
        rows = matrix.len(),
        dim = index.dim(),
        "embeddings and index persisted"
    );

    Ok((matrix, index))
}

/// Persists the embedding matrix with bincode.
pub fn save_matrix(path: &Path, matrix: &[Vec<f32>]) -> Result<(), RetrieverError> {
    let mut file = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut file, matrix)?;
    Ok(())
}

/// Loads a previously persisted embedding matrix.
pub fn load_matrix(path: &Path) -> Result<Vec<Vec<f32>>, RetrieverError> {
    let mut file = BufReader::new(File::open(path)?);
    let matrix: Vec<Vec<f32>> = bincode::deserialize_from(&mut file)?;
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoopProgress;
    use crate::testing::KeywordEmbedder;

    fn config(dir: &tempfile::TempDir) -> RetrieverConfig {
        RetrieverConfig {
            data_path: dir.path().join("stock_news.json"),
            cache_dir: dir.path().join("cache"),
            batch_size: 2,
            top_k: 3,
        }
    }

    fn texts() -> Vec<String> {
        vec![
            "apple earnings beat".into(),
            "bank rates climb".into(),
            "energy output steady".into(),
        ]
    }

    #[test]
    fn paths_follow_corpus_stem() {
        let paths = CachePaths::for_corpus(Path::new("cache"), Path::new("data/stock_news.json"));
        assert_eq!(
            paths.embeddings,
            Path::new("cache/stock_news_embeddings.bin")
        );
        assert_eq!(paths.index, Path::new("cache/stock_news_index.bin"));
    }

    #[tokio::test]
    async fn build_persists_both_files_and_aligns_rows() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let texts = texts();

        let (matrix, index) = load_or_build(&cfg, &texts, &KeywordEmbedder, &NoopProgress)
            .await
            .unwrap();

        assert_eq!(matrix.len(), texts.len());
        assert_eq!(index.len(), texts.len());

        let paths = CachePaths::for_corpus(&cfg.cache_dir, &cfg.data_path);
        assert!(paths.is_valid());
    }

    #[derive(Default)]
    struct RecordingProgress {
        totals: std::sync::Mutex<Vec<u64>>,
        steps: std::sync::Mutex<Vec<String>>,
        finishes: std::sync::Mutex<Vec<String>>,
    }

    impl Progress for RecordingProgress {
        fn set_total(&self, batches: u64) {
            self.totals.lock().unwrap().push(batches);
        }
        fn step(&self, msg: &str) {
            self.steps.lock().unwrap().push(msg.to_string());
        }
        fn finish(&self, msg: &str) {
            self.finishes.lock().unwrap().push(msg.to_string());
        }
    }

    #[tokio::test]
    async fn build_reports_one_step_per_batch() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let progress = RecordingProgress::default();

        // 3 texts at batch_size 2 -> 2 batches.
        load_or_build(&cfg, &texts(), &KeywordEmbedder, &progress)
            .await
            .unwrap();

        assert_eq!(*progress.totals.lock().unwrap(), vec![2]);
        assert_eq!(progress.steps.lock().unwrap().len(), 2);
        assert_eq!(progress.finishes.lock().unwrap().len(), 1);

        // Cache hits report nothing.
        let quiet = RecordingProgress::default();
        load_or_build(&cfg, &texts(), &KeywordEmbedder, &quiet)
            .await
            .unwrap();
        assert!(quiet.totals.lock().unwrap().is_empty());
        assert!(quiet.steps.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rebuild_from_cache_matches_fresh_build() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        let texts = texts();

        let (fresh_matrix, fresh_index) =
            load_or_build(&cfg, &texts, &KeywordEmbedder, &NoopProgress)
                .await
                .unwrap();
        let (cached_matrix, cached_index) =
            load_or_build(&cfg, &texts, &KeywordEmbedder, &NoopProgress)
                .await
                .unwrap();

        assert_eq!(cached_matrix.len(), fresh_matrix.len());
        assert_eq!(cached_matrix[0].len(), fresh_matrix[0].len());

        let probe = [1.0, 0.0, 0.0];
        let fresh: Vec<usize> = fresh_index.search(&probe, 3).into_iter().map(|h| h.1).collect();
        let cached: Vec<usize> = cached_index
            .search(&probe, 3)
            .into_iter()
            .map(|h| h.1)
            .collect();
        assert_eq!(fresh, cached);
    }

    #[tokio::test]
    async fn stale_row_count_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);

        let (_, _) = load_or_build(&cfg, &texts(), &KeywordEmbedder, &NoopProgress)
            .await
            .unwrap();

        // Same cache key, different corpus length.
        let shorter = vec!["apple only".to_string()];
        let result = load_or_build(&cfg, &shorter, &KeywordEmbedder, &NoopProgress).await;
        assert!(matches!(
            result,
            Err(RetrieverError::CacheMismatch { records: 1, rows: 3 })
        ));
    }

    #[test]
    fn matrix_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.bin");
        let matrix = vec![vec![0.25f32, -1.5], vec![3.0, 0.0f32]];
        save_matrix(&path, &matrix).unwrap();
        let loaded = load_matrix(&path).unwrap();
        assert_eq!(loaded, matrix);
    }
}
