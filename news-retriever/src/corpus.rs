//! Corpus loading: parse the JSON news collection and normalize the two
//! accepted shapes into a flat record list.
//!
//! Accepted top-level shapes:
//! - object mapping ticker -> list of article items (ticker from the key)
//! - flat list of article items (ticker from an explicit `ticker` field)
//!
//! Missing fields default to empty strings; items whose `full_text` is empty
//! after normalization are dropped.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::retriever_error::RetrieverError;
use crate::structs::record::NewsRecord;

/// Loaded corpus: records plus the parallel texts used for embedding.
///
/// `texts[i]` is `"{title}\n\n{full_text}"` of `records[i]`.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub records: Vec<NewsRecord>,
    pub texts: Vec<String>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads and normalizes the corpus file.
///
/// # Errors
/// - [`RetrieverError::CorpusMissing`] if the file does not exist
/// - [`RetrieverError::Json`] if the file is not valid JSON
/// - [`RetrieverError::UnsupportedFormat`] for any other top-level shape
pub fn load_corpus(path: &Path) -> Result<Corpus, RetrieverError> {
    info!(target: "retriever::corpus", path = %path.display(), "loading corpus");

    if !path.exists() {
        return Err(RetrieverError::CorpusMissing {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;

    let mut records = Vec::new();

    match value {
        Value::Object(map) => {
            for (ticker, items) in map {
                let Value::Array(items) = items else {
                    warn!(
                        target: "retriever::corpus",
                        ticker = %ticker,
                        "skipping non-list entry"
                    );
                    continue;
                };
                for item in &items {
                    records.push(NewsRecord {
                        ticker: ticker.clone(),
                        title: str_field(item, "title"),
                        link: str_field(item, "link"),
                        full_text: str_field(item, "full_text"),
                    });
                }
            }
        }
        Value::Array(items) => {
            for item in &items {
                records.push(NewsRecord {
                    ticker: str_field(item, "ticker"),
                    title: str_field(item, "title"),
                    link: str_field(item, "link"),
                    full_text: str_field(item, "full_text"),
                });
            }
        }
        _ => return Err(RetrieverError::UnsupportedFormat),
    }

    records.retain(|r| !r.full_text.is_empty());

    let texts = records
        .iter()
        .map(|r| format!("{}\n\n{}", r.title, r.full_text))
        .collect();

    info!(
        target: "retriever::corpus",
        records = records.len(),
        "corpus loaded"
    );

    Ok(Corpus { records, texts })
}

fn str_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_json(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_ticker_map_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(
            &dir,
            "news.json",
            r#"{
                "AAPL": [
                    {"title": "Apple launch", "link": "a", "full_text": "Apple shipped a product."},
                    {"title": "No body", "link": "b", "full_text": ""}
                ],
                "MSFT": [
                    {"title": "Azure growth", "link": "c", "full_text": "Cloud revenue climbed."}
                ]
            }"#,
        );

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.records.len(), corpus.texts.len());
        assert!(corpus.records.iter().all(|r| !r.full_text.is_empty()));

        let apple = corpus
            .records
            .iter()
            .find(|r| r.ticker == "AAPL")
            .unwrap();
        assert_eq!(apple.title, "Apple launch");
        let text = &corpus.texts[corpus
            .records
            .iter()
            .position(|r| r.ticker == "AAPL")
            .unwrap()];
        assert_eq!(text, "Apple launch\n\nApple shipped a product.");
    }

    #[test]
    fn loads_flat_list_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(
            &dir,
            "news.json",
            r#"[
                {"ticker": "NVDA", "title": "Chips", "link": "x", "full_text": "Record quarter."},
                {"ticker": "TSLA", "title": "Cars", "link": "y", "full_text": "Deliveries rose."}
            ]"#,
        );

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.records[0].ticker, "NVDA");
        assert_eq!(corpus.records[1].link, "y");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(
            &dir,
            "news.json",
            r#"[{"full_text": "body only, no title or link"}]"#,
        );

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.records[0].title, "");
        assert_eq!(corpus.records[0].ticker, "");
    }

    #[test]
    fn rejects_scalar_top_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(&dir, "news.json", r#""just a string""#);
        assert!(matches!(
            load_corpus(&path),
            Err(RetrieverError::UnsupportedFormat)
        ));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            load_corpus(&path),
            Err(RetrieverError::CorpusMissing { .. })
        ));
    }

    #[test]
    fn skips_non_list_ticker_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(
            &dir,
            "news.json",
            r#"{"AAPL": {"title": "not a list"}, "MSFT": [{"title": "t", "link": "l", "full_text": "ok"}]}"#,
        );
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.records[0].ticker, "MSFT");
    }
}
