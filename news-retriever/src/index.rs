//! Exact flat similarity index: brute-force k-nearest-neighbor search by
//! squared Euclidean distance over the embedding matrix.
//!
//! The corpus is small and static, so an exhaustive scan is both simple and
//! fast enough; there is no ANN structure. The index is serde-serializable
//! and persisted to disk with bincode next to the embedding matrix.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::retriever_error::RetrieverError;

/// Flat L2 index over fixed-dimension vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Builds an index over the given matrix.
    ///
    /// # Errors
    /// Returns [`RetrieverError::InvalidConfig`] if rows have inconsistent
    /// dimensions.
    pub fn build(matrix: &[Vec<f32>]) -> Result<Self, RetrieverError> {
        let dim = matrix.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = matrix.iter().find(|v| v.len() != dim) {
            return Err(RetrieverError::InvalidConfig(format!(
                "inconsistent embedding dimensions: expected {dim}, found {}",
                bad.len()
            )));
        }

        debug!(target: "retriever::index", rows = matrix.len(), dim, "flat index built");
        Ok(Self {
            dim,
            vectors: matrix.to_vec(),
        })
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True when nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimensionality.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Exhaustive k-nearest-neighbor search.
    ///
    /// Returns at most `k` `(squared_distance, row)` pairs, ascending by
    /// distance. Distances are only used for candidate selection; callers
    /// re-derive the reported score (cosine) themselves.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<(f32, usize)> {
        if k == 0 || self.vectors.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(f32, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, v)| (l2_squared(query, v), row))
            .collect();

        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.truncate(k);
        hits
    }

    /// Persists the index to `path` with bincode.
    pub fn save(&self, path: &Path) -> Result<(), RetrieverError> {
        let mut file = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut file, self)?;
        Ok(())
    }

    /// Loads a previously persisted index.
    pub fn load(path: &Path) -> Result<Self, RetrieverError> {
        let mut file = BufReader::new(File::open(path)?);
        let index: FlatIndex = bincode::deserialize_from(&mut file)?;
        Ok(index)
    }
}

/// Squared Euclidean distance over the shared prefix of both slices.
fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> Vec<Vec<f32>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.9, 0.1, 0.0],
            vec![0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn search_orders_by_distance() {
        let index = FlatIndex::build(&matrix()).unwrap();
        let hits = index.search(&[1.0, 0.0, 0.0], 3);
        let rows: Vec<usize> = hits.iter().map(|h| h.1).collect();
        assert_eq!(rows, vec![0, 2, 1]);
        assert!(hits[0].0 <= hits[1].0 && hits[1].0 <= hits[2].0);
    }

    #[test]
    fn search_caps_at_corpus_size() {
        let index = FlatIndex::build(&matrix()).unwrap();
        let hits = index.search(&[1.0, 0.0, 0.0], 10);
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = FlatIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert!(index.search(&[1.0], 5).is_empty());
    }

    #[test]
    fn rejects_ragged_matrix() {
        let ragged = vec![vec![1.0, 0.0], vec![1.0]];
        assert!(matches!(
            FlatIndex::build(&ragged),
            Err(RetrieverError::InvalidConfig(_))
        ));
    }

    #[test]
    fn save_load_round_trip_preserves_neighbors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe_index.bin");

        let built = FlatIndex::build(&matrix()).unwrap();
        built.save(&path).unwrap();
        let loaded = FlatIndex::load(&path).unwrap();

        assert_eq!(loaded.len(), built.len());
        assert_eq!(loaded.dim(), built.dim());

        let probe = [0.2, 0.8, 0.0];
        let a: Vec<usize> = built.search(&probe, 4).into_iter().map(|h| h.1).collect();
        let b: Vec<usize> = loaded.search(&probe, 4).into_iter().map(|h| h.1).collect();
        assert_eq!(a, b);
    }
}
