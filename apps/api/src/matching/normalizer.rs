//! Normalizer: canonical token string for lexical comparison.
//!
//! Pipeline (order matters): strip ASCII punctuation → lowercase → split on
//! Unicode word boundaries and English contractions → drop stopwords → rejoin
//! with single spaces.

use std::fmt;

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::matching::stopwords;

/// Text after normalization. Tokens are separated by exactly one space.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of tokens in the normalized text.
    pub fn token_count(&self) -> usize {
        self.0.split(' ').filter(|t| !t.is_empty()).count()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for NormalizedText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalizes raw document text. Never fails; empty input yields empty output.
pub fn normalize(text: &str) -> NormalizedText {
    let stripped: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let lowered = stripped.to_lowercase();

    let kept: Vec<&str> = tokenize(&lowered)
        .filter(|token| !stopwords::is_stopword(token))
        .collect();

    NormalizedText(kept.join(" "))
}

/// Contracted words split into two tokens, with the split offset.
/// "cannot" becomes "can" + "not", both stopwords, so it drops out entirely.
const CONTRACTIONS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// Splits text into word tokens on UAX #29 word boundaries, then splits the
/// contracted words in `CONTRACTIONS` (whole tokens, any case).
/// Whitespace-only segments are dropped; other segments (including
/// non-ASCII punctuation such as `–` or `…`) are kept as tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_word_bounds()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .flat_map(|token| match split_contraction(token) {
            Some((head, tail)) => [Some(head), Some(tail)],
            None => [Some(token), None],
        })
        .flatten()
}

fn split_contraction(token: &str) -> Option<(&str, &str)> {
    CONTRACTIONS
        .iter()
        .find(|(word, _)| token.eq_ignore_ascii_case(word))
        .map(|&(_, at)| token.split_at(at))
}

/// Builds the process-wide tokenizer resources ahead of the first request.
/// Calling it more than once is harmless.
pub fn init() {
    let words = stopwords::init();
    tracing::debug!("Normalizer ready ({words} stopwords)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_only_punctuation_and_stopwords_yields_empty() {
        assert_eq!(normalize("!!! ... ,,, ???"), "");
        assert_eq!(normalize("The and, of; a -- in"), "");
    }

    #[test]
    fn test_scenario_resume_sentence() {
        let text = normalize("Experienced software engineer skilled in Python and Go.");
        assert_eq!(text, "experienced software engineer skilled python go");
    }

    #[test]
    fn test_scenario_job_description_sentence() {
        let text = normalize("Looking for a software engineer experienced in Go and Python.");
        assert_eq!(text, "looking software engineer experienced go python");
    }

    #[test]
    fn test_punctuation_removed_before_tokenizing() {
        // The apostrophe goes first, so "don't" becomes "dont" which is not a stopword.
        assert_eq!(normalize("Don't panic"), "dont panic");
        assert_eq!(normalize("C++/Rust, e-mail"), "crust email");
    }

    #[test]
    fn test_whitespace_collapses_to_single_spaces() {
        assert_eq!(
            normalize("  Rust\t\tdeveloper\r\n\r\nKubernetes   "),
            "rust developer kubernetes"
        );
    }

    #[test]
    fn test_non_ascii_punctuation_survives_as_token() {
        assert_eq!(normalize("Rust – Go"), "rust – go");
    }

    #[test]
    fn test_unicode_lowercasing() {
        assert_eq!(normalize("ÉCOLE Zürich"), "école zürich");
    }

    #[test]
    fn test_uppercase_stopwords_removed_after_lowercasing() {
        assert_eq!(normalize("THE Engineer AND The Manager"), "engineer manager");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "",
            "Experienced software engineer skilled in Python and Go.",
            "Senior Rust Engineer — Core Infrastructure (5+ years)",
            "We're looking for: Kubernetes, Kafka & CI/CD!",
            "  multiple   spaces\nand\ttabs ",
            "Résumé: naïve café owner…",
        ];
        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_token_count() {
        assert_eq!(normalize("").token_count(), 0);
        assert_eq!(normalize("Rust and Go engineer").token_count(), 3);
    }

    #[test]
    fn test_cannot_drops_out_as_two_stopwords() {
        assert_eq!(normalize("We cannot relocate"), "relocate");
        assert_eq!(normalize("CANNOT"), "");
    }

    #[test]
    fn test_informal_contractions_are_split() {
        assert_eq!(normalize("gonna ship"), "gon na ship");
        assert_eq!(normalize("Wanna build"), "wan na build");
        assert_eq!(normalize("gotta deploy"), "got ta deploy");
        assert_eq!(normalize("gimme feedback"), "gim feedback");
        assert_eq!(normalize("lemme know"), "lem know");
    }

    #[test]
    fn test_contractions_only_split_whole_tokens() {
        assert_eq!(normalize("cannots gonnabe"), "cannots gonnabe");
    }

    #[test]
    fn test_contraction_split_is_idempotent() {
        let once = normalize("We gonna ship, wanna test, gotta deploy");
        assert_eq!(normalize(once.as_str()), once);
    }

    #[test]
    fn test_tokenize_splits_contractions_in_any_case() {
        let tokens: Vec<&str> = tokenize("Gonna LEMME cannot").collect();
        assert_eq!(tokens, vec!["Gon", "na", "LEM", "ME", "can", "not"]);
    }

    #[test]
    fn test_tokenize_drops_whitespace_segments() {
        let tokens: Vec<&str> = tokenize("hello  world\n").collect();
        assert_eq!(tokens, vec!["hello", "world"]);
    }
}
