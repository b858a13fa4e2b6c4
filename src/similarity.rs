//! Fuzzy string primitives behind a small capability trait.
//!
//! Detection logic only ever talks to [`TextMetrics`], so the concrete
//! similarity and stemming algorithms can be swapped without touching the
//! analyzers.

use rust_stemmers::{Algorithm, Stemmer};
use strsim::normalized_damerau_levenshtein;

/// String-similarity and stemming capabilities used by the detectors.
pub trait TextMetrics {
    /// Whole-string similarity ratio in [0, 100].
    fn similarity(&self, a: &str, b: &str) -> u32;

    /// Best-aligned substring similarity in [0, 100].
    ///
    /// The shorter input slides across the longer one; the best window
    /// similarity wins. Partial-ratio style rather than whole-string.
    fn partial_similarity(&self, a: &str, b: &str) -> u32;

    /// Reduce a token to its stem.
    fn stem(&self, token: &str) -> String;
}

/// Production metrics: normalized Damerau-Levenshtein plus English Snowball
/// stemming.
///
/// Damerau rather than plain Levenshtein so single transpositions
/// ("storgae" vs "storage") still clear the key-correction threshold.
pub struct FuzzyMetrics {
    stemmer: Stemmer,
}

impl FuzzyMetrics {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for FuzzyMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn ratio(a: &str, b: &str) -> u32 {
    (normalized_damerau_levenshtein(a, b) * 100.0).round() as u32
}

impl TextMetrics for FuzzyMetrics {
    fn similarity(&self, a: &str, b: &str) -> u32 {
        ratio(a, b)
    }

    fn partial_similarity(&self, a: &str, b: &str) -> u32 {
        let (short, long) = if a.chars().count() <= b.chars().count() {
            (a, b)
        } else {
            (b, a)
        };
        let short_len = short.chars().count();
        let long_chars: Vec<char> = long.chars().collect();
        if short_len == 0 {
            return if long_chars.is_empty() { 100 } else { 0 };
        }
        if long_chars.len() == short_len {
            return ratio(short, long);
        }

        let mut best = 0;
        for window in long_chars.windows(short_len) {
            let candidate: String = window.iter().collect();
            best = best.max(ratio(short, &candidate));
            if best == 100 {
                break;
            }
        }
        best
    }

    fn stem(&self, token: &str) -> String {
        self.stemmer.stem(token).into_owned()
    }
}
