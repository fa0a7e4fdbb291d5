//! Deterministic text normalization and token extraction
//!
//! Every id in the pipeline is a content hash of normalized text, so
//! normalization must be stable: lowercase, whitespace collapsed, no
//! locale-dependent behavior.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Statement boundary characters used by the fact extractor.
pub static STATEMENT_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?;\n]+").expect("statement boundary regex"));

/// Words ignored when computing significant tokens.
const STOPWORDS: &[&str] = &[
    "the", "and", "our", "are", "but", "for", "with", "that", "this", "from", "have", "has",
    "had", "not", "can", "into", "out", "too", "very", "when", "then", "they", "them", "their",
    "its", "was", "were", "will", "would", "could", "should", "about", "been", "being", "also",
    "because", "while", "what", "which", "who", "how", "all", "each", "every", "some", "most",
    "more", "than", "over", "under", "between", "just", "only", "still", "there", "here", "you",
    "your", "get", "gets", "like", "ours",
];

/// Normalize free text: lowercase, collapse whitespace, trim.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    WHITESPACE.replace_all(&lowered, " ").into_owned()
}

/// Extract the significant tokens of a statement, in first-occurrence order.
///
/// Tokens are normalized words of length >= 3 with punctuation stripped,
/// minus a fixed stopword list. Duplicates are dropped.
#[must_use]
pub fn significant_tokens(text: &str) -> Vec<String> {
    let normalized = normalize_text(text);
    let cleaned: String = normalized
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut tokens = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.len() < 3 || STOPWORDS.contains(&word) {
            continue;
        }
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens
}

/// Truncate text to at most `max_words` whitespace-separated words.
#[must_use]
pub fn clip_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count whitespace-separated words.
#[inline]
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_collapses() {
        assert_eq!(
            normalize_text("  Approvals   QUEUE\tovernight "),
            "approvals queue overnight"
        );
    }

    #[test]
    fn significant_tokens_strip_stopwords_and_short_words() {
        let tokens = significant_tokens("We are blocked on the approvals queue");
        assert_eq!(tokens, vec!["blocked", "approvals", "queue"]);
    }

    #[test]
    fn significant_tokens_strip_punctuation() {
        let tokens = significant_tokens("forecasts, swing wildly (every quarter)");
        assert_eq!(tokens, vec!["forecasts", "swing", "wildly", "quarter"]);
    }

    #[test]
    fn significant_tokens_dedupe() {
        let tokens = significant_tokens("handoffs after handoffs after handoffs");
        assert_eq!(tokens, vec!["handoffs", "after"]);
    }

    #[test]
    fn clip_words_bounds_length() {
        assert_eq!(clip_words("one two three four", 2), "one two");
        assert_eq!(clip_words("one two", 10), "one two");
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count("a brief, declarative claim"), 4);
        assert_eq!(word_count(""), 0);
    }
}
