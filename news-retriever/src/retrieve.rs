//! Query-time ranking: cosine re-scoring of flat-index candidates and the
//! mode-dependent filtering policy.
//!
//! The index selects candidates by Euclidean distance; the reported score is
//! re-derived as cosine similarity between the L2-normalized query and
//! candidate vectors so callers always see a bounded, interpretable number
//! regardless of the index metric.

use tracing::debug;

use crate::mode::AnswerMode;
use crate::structs::record::{NewsRecord, RetrievedDocument};

/// Characters of `full_text` kept as the display/prompt snippet.
pub const SNIPPET_CHARS: usize = 600;

/// Concise mode: minimum cosine score and result cap.
const CONCISE_MIN_SCORE: f32 = 0.4;
const CONCISE_KEEP: usize = 2;

/// Detailed mode: minimum cosine score and minimum snippet length.
const DETAILED_MIN_SCORE: f32 = 0.1;
const DETAILED_MIN_SNIPPET_CHARS: usize = 50;

const NORM_EPS: f32 = 1e-12;

/// Builds ranked documents from `(distance, row)` candidates.
///
/// Rows outside the corpus are skipped (an index file loaded from disk is not
/// trusted to match the corpus). The candidate set is then sorted descending
/// by cosine score and the mode policy applied.
pub(crate) fn rank_candidates(
    query_vec: &[f32],
    candidates: &[(f32, usize)],
    records: &[NewsRecord],
    embeddings: &[Vec<f32>],
    top_k: usize,
    mode: AnswerMode,
) -> Vec<RetrievedDocument> {
    let q_norm = l2_normalize(query_vec);

    let mut results: Vec<RetrievedDocument> = Vec::with_capacity(candidates.len());
    for &(_dist, row) in candidates {
        if row >= records.len() || row >= embeddings.len() {
            debug!(target: "retriever::search", row, "skipping out-of-range candidate");
            continue;
        }

        let doc_norm = l2_normalize(&embeddings[row]);
        let score = dot(&q_norm, &doc_norm);

        let record = &records[row];
        results.push(RetrievedDocument {
            title: record.title.clone(),
            link: record.link.clone(),
            ticker: record.ticker.clone(),
            snippet: snippet_of(&record.full_text),
            index: row,
            score,
        });
    }

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    apply_mode_policy(results, top_k, mode)
}

/// Mode-dependent ranking policy.
///
/// - concise: score > 0.4, keep at most the first 2;
/// - detailed: score > 0.1 and snippet longer than 50 chars, keep at most
///   the first `top_k`.
fn apply_mode_policy(
    mut results: Vec<RetrievedDocument>,
    top_k: usize,
    mode: AnswerMode,
) -> Vec<RetrievedDocument> {
    match mode {
        AnswerMode::Concise => {
            results.retain(|r| r.score > CONCISE_MIN_SCORE);
            results.truncate(CONCISE_KEEP);
        }
        AnswerMode::Detailed => {
            results.retain(|r| {
                r.score > DETAILED_MIN_SCORE
                    && r.snippet.chars().count() > DETAILED_MIN_SNIPPET_CHARS
            });
            results.truncate(top_k);
        }
    }
    results
}

/// First `SNIPPET_CHARS` characters of the article body.
pub(crate) fn snippet_of(full_text: &str) -> String {
    full_text.chars().take(SNIPPET_CHARS).collect()
}

fn l2_normalize(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt() + NORM_EPS;
    v.iter().map(|x| x / norm).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ticker: &str, title: &str, body: &str) -> NewsRecord {
        NewsRecord {
            ticker: ticker.into(),
            title: title.into(),
            link: format!("https://example.com/{ticker}"),
            full_text: body.into(),
        }
    }

    fn long_body(lead: &str) -> String {
        format!("{lead} — {}", "context ".repeat(20))
    }

    /// Four docs with controlled cosine scores against query [1,0,0]:
    /// row 0 → 1.0, row 1 → ~0.707, row 2 → ~0.316, row 3 → 0.0.
    fn fixture() -> (Vec<NewsRecord>, Vec<Vec<f32>>) {
        let records = vec![
            record("AAPL", "Apple AI initiatives", &long_body("Apple has launched new AI initiatives")),
            record("AAPL", "Apple banking tie-up", &long_body("Apple and a bank partner")),
            record("JPM", "Banks mention Apple", &long_body("Mostly banking news")),
            record("XOM", "Energy update", &long_body("Crude output steady")),
        ];
        let embeddings = vec![
            vec![1.0, 0.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![1.0, 3.0, 0.0],
            vec![0.0, 1.0, 0.0],
        ];
        (records, embeddings)
    }

    fn candidates(n: usize) -> Vec<(f32, usize)> {
        (0..n).map(|i| (i as f32, i)).collect()
    }

    #[test]
    fn concise_keeps_at_most_two_high_confidence_docs() {
        let (records, embeddings) = fixture();
        let out = rank_candidates(
            &[1.0, 0.0, 0.0],
            &candidates(4),
            &records,
            &embeddings,
            4,
            AnswerMode::Concise,
        );

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|d| d.score > 0.4));
        assert!(out[0].score >= out[1].score);
        assert_eq!(out[0].index, 0);
        assert_eq!(out[1].index, 1);
    }

    #[test]
    fn detailed_applies_score_and_length_floors() {
        let (records, embeddings) = fixture();
        let out = rank_candidates(
            &[1.0, 0.0, 0.0],
            &candidates(4),
            &records,
            &embeddings,
            4,
            AnswerMode::Detailed,
        );

        // Row 3 scores 0.0 and is dropped; the rest pass both floors.
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|d| d.score > 0.1));
        assert!(out.iter().all(|d| d.snippet.chars().count() > 50));
        assert!(out.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn detailed_drops_short_snippets_even_when_relevant() {
        let records = vec![record("AAPL", "Terse", "Short note.")];
        let embeddings = vec![vec![1.0, 0.0, 0.0]];
        let out = rank_candidates(
            &[1.0, 0.0, 0.0],
            &[(0.0, 0)],
            &records,
            &embeddings,
            3,
            AnswerMode::Detailed,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn out_of_range_rows_are_skipped() {
        let (records, embeddings) = fixture();
        let out = rank_candidates(
            &[1.0, 0.0, 0.0],
            &[(0.0, 0), (0.1, 99)],
            &records,
            &embeddings,
            4,
            AnswerMode::Concise,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 0);
    }

    #[test]
    fn snippet_is_600_chars_and_boundary_safe() {
        let body = "é".repeat(700);
        assert_eq!(snippet_of(&body).chars().count(), 600);
        assert_eq!(snippet_of("short"), "short");
    }

    #[test]
    fn single_record_behaves_per_threshold() {
        // "Apple AI" against the only record: cosine 1.0 > 0.4 → returned.
        let records = vec![record(
            "AAPL",
            "Apple AI initiatives",
            &long_body("Apple has launched new AI initiatives"),
        )];
        let embeddings = vec![vec![1.0, 0.0, 0.0]];
        let hit = rank_candidates(
            &[1.0, 0.0, 0.0],
            &[(0.0, 0)],
            &records,
            &embeddings,
            3,
            AnswerMode::Concise,
        );
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].title, "Apple AI initiatives");

        // An orthogonal query scores 0.0 ≤ 0.4 → empty.
        let miss = rank_candidates(
            &[0.0, 1.0, 0.0],
            &[(2.0, 0)],
            &records,
            &embeddings,
            3,
            AnswerMode::Concise,
        );
        assert!(miss.is_empty());
    }
}
