//! Prompt assembly: context block construction and mode-specific
//! instructions.

use news_retriever::{AnswerMode, RetrievedDocument};

use crate::clean::clean_snippet;

const CONCISE_INSTRUCTION: &str = "You are a financial news assistant. \
Using the context below, write a **clear and concise one-sentence summary** \
in proper English. Focus on the main point only.";

const DETAILED_INSTRUCTION: &str = "You are a financial news assistant. \
Using the context below, write a single, well-structured paragraph in plain \
English. Summarize the key facts without repeating text verbatim. Do not \
include irrelevant boilerplate like 'Upgrade' or 'premium'. If multiple \
sources mention the same news, merge them into one cohesive explanation.";

/// Builds the context block from ranked documents.
///
/// Each snippet is cleaned first; documents that clean to nothing are
/// dropped. In detailed mode every surviving part is prefixed with its rank
/// and title so the model can attribute facts. Returns `None` when no
/// document contributes text.
pub fn build_context(documents: &[RetrievedDocument], mode: AnswerMode) -> Option<String> {
    let mut parts = Vec::with_capacity(documents.len());

    for (rank, doc) in documents.iter().enumerate() {
        let snippet = clean_snippet(&doc.snippet);
        if snippet.is_empty() {
            continue;
        }
        match mode {
            AnswerMode::Detailed => parts.push(format!("[{}] {}: {snippet}", rank + 1, doc.title)),
            AnswerMode::Concise => parts.push(snippet),
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

/// Final prompt sent to the generation model.
pub fn build_prompt(query: &str, context: &str, mode: AnswerMode) -> String {
    let instruction = match mode {
        AnswerMode::Concise => CONCISE_INSTRUCTION,
        AnswerMode::Detailed => DETAILED_INSTRUCTION,
    };
    format!("{instruction}\n\nContext:\n{context}\n\nQuestion: {query}\n\nAnswer:")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, snippet: &str) -> RetrievedDocument {
        RetrievedDocument {
            title: title.into(),
            link: "https://example.com/a".into(),
            ticker: "AAPL".into(),
            snippet: snippet.into(),
            index: 0,
            score: 0.9,
        }
    }

    #[test]
    fn concise_context_joins_bare_snippets() {
        let docs = vec![doc("First", "Apple shipped."), doc("Second", "Revenue rose.")];
        let context = build_context(&docs, AnswerMode::Concise).unwrap();
        assert_eq!(context, "Apple shipped.\n\nRevenue rose.");
    }

    #[test]
    fn detailed_context_prefixes_rank_and_title() {
        let docs = vec![doc("First", "Apple shipped."), doc("Second", "Revenue rose.")];
        let context = build_context(&docs, AnswerMode::Detailed).unwrap();
        assert_eq!(
            context,
            "[1] First: Apple shipped.\n\n[2] Second: Revenue rose."
        );
    }

    #[test]
    fn all_boilerplate_yields_no_context() {
        let docs = vec![doc("Paywalled", "Sign in Upgrade subscribe")];
        assert!(build_context(&docs, AnswerMode::Concise).is_none());
        assert!(build_context(&docs, AnswerMode::Detailed).is_none());
    }

    #[test]
    fn rank_counts_skipped_documents() {
        // Rank reflects retrieval order even when a document cleans to empty.
        let docs = vec![doc("Paywalled", "subscribe"), doc("Real", "Shares fell.")];
        let context = build_context(&docs, AnswerMode::Detailed).unwrap();
        assert_eq!(context, "[2] Real: Shares fell.");
    }

    #[test]
    fn prompt_layout_is_stable() {
        let prompt = build_prompt("What happened?", "Apple shipped.", AnswerMode::Concise);
        assert!(prompt.starts_with("You are a financial news assistant."));
        assert!(prompt.contains("\n\nContext:\nApple shipped.\n\n"));
        assert!(prompt.ends_with("Question: What happened?\n\nAnswer:"));
    }
}
