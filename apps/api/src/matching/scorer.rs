//! Similarity scoring: character-level gestalt ratio between two normalized texts.

use std::fmt;

use serde::Serialize;

use crate::matching::normalizer::{normalize, NormalizedText};
use crate::matching::sequence_matcher::SequenceMatcher;

/// Similarity percentage in `[0.0, 100.0]`, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    /// Scales a `[0, 1]` ratio to a percentage rounded to two decimal places.
    ///
    /// Rounding works on the exact binary value, ties to even: `0.125` rounds
    /// to `0.12`, and `2.675` (stored just below) to `2.67`.
    pub fn from_ratio(ratio: f64) -> Self {
        let percentage = ratio.clamp(0.0, 1.0) * 100.0;
        let rounded = format!("{percentage:.2}")
            .parse::<f64>()
            .unwrap_or(percentage);
        Self(rounded)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Normalizes both texts and scores them.
pub fn similarity(text1: &str, text2: &str) -> SimilarityScore {
    score_normalized(&normalize(text1), &normalize(text2))
}

/// Scores two already-normalized texts.
///
/// The comparison runs over characters, inter-token spaces included, so word
/// order matters. The pair is ordered before matching, which makes the score
/// independent of argument order.
pub fn score_normalized(first: &NormalizedText, second: &NormalizedText) -> SimilarityScore {
    let (a, b) = if first <= second {
        (first, second)
    } else {
        (second, first)
    };
    let matcher = SequenceMatcher::new(a.as_str(), b.as_str());
    if !matcher.popular().is_empty() {
        tracing::trace!("{} popular chars left out of the index", matcher.popular().len());
    }
    SimilarityScore::from_ratio(matcher.ratio())
}
