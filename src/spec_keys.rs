//! Spec key correction.
//!
//! Free-form spec keys ("Storgae", "  CAMERA ") are fuzzy-matched against a
//! fixed vocabulary of known keys. Close matches are rewritten silently;
//! everything else is kept as-is and flagged.

use crate::config::AnalyzerConfig;
use crate::normalize::normalize_text;
use crate::scoring::Issue;
use crate::similarity::{FuzzyMetrics, TextMetrics};
use log::debug;
use std::collections::HashMap;

/// Spec mapping after key correction: every key is either a vocabulary term
/// or a normalized unknown key that was flagged with a warning.
pub type NormalizedSpecs = HashMap<String, String>;

pub struct SpecKeyCorrector {
    vocabulary: Vec<String>,
    threshold: u32,
    metrics: Box<dyn TextMetrics>,
}

impl SpecKeyCorrector {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_metrics(config, Box::new(FuzzyMetrics::new()))
    }

    pub fn with_metrics(config: &AnalyzerConfig, metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            vocabulary: config
                .known_spec_keys
                .iter()
                .map(|key| normalize_text(key))
                .collect(),
            threshold: config.key_match_threshold,
            metrics,
        }
    }

    /// Rewrite every raw key to its best vocabulary match, or keep it
    /// (normalized) with a warning when nothing scores above the threshold.
    ///
    /// Keys are processed in sorted order so the emitted warnings are
    /// deterministic even though the input mapping is unordered. Every input
    /// key yields exactly one output entry; two raw keys correcting to the
    /// same vocabulary term collapse to one entry.
    pub fn normalize_keys(
        &self,
        specs: &HashMap<String, String>,
    ) -> (NormalizedSpecs, Vec<Issue>) {
        let mut corrected = NormalizedSpecs::new();
        let mut issues = Vec::new();

        let mut entries: Vec<(&String, &String)> = specs.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for (raw_key, value) in entries {
            let key = normalize_text(raw_key);
            match self.best_match(&key) {
                Some((term, score)) if score >= self.threshold => {
                    if term != key {
                        debug!("corrected spec key '{raw_key}' to '{term}' (score {score})");
                    }
                    corrected.insert(term, value.clone());
                }
                _ => {
                    issues.push(Issue::warning(format!("Unknown spec key: '{raw_key}'")));
                    corrected.insert(key, value.clone());
                }
            }
        }

        (corrected, issues)
    }

    /// Best vocabulary match for a normalized key.
    ///
    /// Ties go to the earliest vocabulary term: the scan only replaces the
    /// candidate on a strictly greater score. This tie-break is
    /// implementation-defined and would differ under another fuzzy matcher.
    fn best_match(&self, key: &str) -> Option<(String, u32)> {
        let mut best: Option<(String, u32)> = None;
        for term in &self.vocabulary {
            let score = self.metrics.similarity(key, term);
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((term.clone(), score));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector() -> SpecKeyCorrector {
        SpecKeyCorrector::new(&AnalyzerConfig::default())
    }

    fn specs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn exact_keys_pass_through() {
        let (corrected, issues) = corrector().normalize_keys(&specs(&[("storage", "128GB")]));
        assert_eq!(corrected.get("storage").map(String::as_str), Some("128GB"));
        assert!(issues.is_empty());
    }

    #[test]
    fn misspelled_key_is_corrected_silently() {
        let (corrected, issues) = corrector().normalize_keys(&specs(&[("Strage", "64GB")]));
        assert_eq!(corrected.get("storage").map(String::as_str), Some("64GB"));
        assert!(issues.is_empty());
    }

    #[test]
    fn transposed_key_is_corrected() {
        let (corrected, issues) = corrector().normalize_keys(&specs(&[("Storgae", "256GB")]));
        assert_eq!(corrected.get("storage").map(String::as_str), Some("256GB"));
        assert!(issues.is_empty());
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        let (corrected, issues) = corrector().normalize_keys(&specs(&[("  BRAND ", "Sony")]));
        assert_eq!(corrected.get("brand").map(String::as_str), Some("Sony"));
        assert!(issues.is_empty());
    }

    #[test]
    fn unknown_key_is_kept_and_flagged() {
        let (corrected, issues) = corrector().normalize_keys(&specs(&[("Warranty", "2 years")]));
        assert_eq!(
            corrected.get("warranty").map(String::as_str),
            Some("2 years")
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Unknown spec key: 'Warranty'");
    }

    #[test]
    fn every_key_maps_to_exactly_one_entry() {
        let input = specs(&[("storage", "128GB"), ("brand", "Sony"), ("Warranty", "1y")]);
        let (corrected, _) = corrector().normalize_keys(&input);
        assert_eq!(corrected.len(), 3);
    }

    #[test]
    fn correction_is_deterministic_across_calls() {
        let input = specs(&[("Storgae", "64GB"), ("Pirce", "100"), ("odd", "x")]);
        let c = corrector();
        let first = c.normalize_keys(&input);
        let second = c.normalize_keys(&input);
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }
}
