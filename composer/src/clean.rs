//! Snippet sanitation: strip paywall/subscription boilerplate and collapse
//! whitespace before text reaches a prompt.

use std::sync::OnceLock;

use regex::Regex;

static BOILERPLATE_CELL: OnceLock<Regex> = OnceLock::new();

/// Case-insensitive alternation of boilerplate phrases seen in scraped
/// financial-news bodies. `Upgrade` and `subscribe` are deliberately last so
/// the longer phrases containing them win first.
fn boilerplate() -> &'static Regex {
    BOILERPLATE_CELL.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)(PREMIUM Upgrade|A Silver or Gold subscription plan is required|",
            r"Already have a subscription|Continue Reading|View Comments|Sign in|",
            r"Read this MT Newswires article|Upgrade|subscribe)",
        ))
        .unwrap_or_else(|e| panic!("invalid boilerplate pattern: {e}"))
    })
}

/// Removes boilerplate phrases and normalizes all whitespace runs to single
/// spaces. Returns an empty string when nothing meaningful remains.
pub fn clean_snippet(snippet: &str) -> String {
    if snippet.is_empty() {
        return String::new();
    }

    let stripped = boilerplate().replace_all(snippet, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_boilerplate_in_any_case() {
        let cleaned = clean_snippet("Markets rallied. CONTINUE reading Subscribe view comments");
        assert_eq!(cleaned, "Markets rallied.");
    }

    #[test]
    fn boilerplate_never_survives() {
        for phrase in [
            "PREMIUM Upgrade",
            "A Silver or Gold subscription plan is required",
            "Already have a subscription",
            "Continue Reading",
            "View Comments",
            "Sign in",
            "Read this MT Newswires article",
            "Upgrade",
            "subscribe",
        ] {
            let lower = clean_snippet(&phrase.to_lowercase());
            let upper = clean_snippet(&phrase.to_uppercase());
            assert!(lower.is_empty(), "survived: {lower:?}");
            assert!(upper.is_empty(), "survived: {upper:?}");
        }
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(
            clean_snippet("Shares  rose\n\n  5%   today."),
            "Shares rose 5% today."
        );
    }

    #[test]
    fn pure_boilerplate_cleans_to_empty() {
        assert_eq!(clean_snippet("Sign in  subscribe Upgrade"), "");
        assert_eq!(clean_snippet(""), "");
    }
}
