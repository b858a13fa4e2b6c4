//! Red-flag phrase detection.
//!
//! Scans arbitrary listing text for phrases connoting fakes and replicas.
//! Four strategies run per phrase, strict to loose, first hit wins: exact
//! substring, adjacent word pair, fuzzy single token, stemmed-token subset.
//! Exact and bigram matches are high-precision; fuzzy and stem matching are
//! fallbacks for obfuscated phrasing.

use crate::config::AnalyzerConfig;
use crate::normalize::normalize_text;
use crate::scoring::Issue;
use crate::similarity::{FuzzyMetrics, TextMetrics};
use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// Tokens shorter than this never participate in fuzzy matching. Below four
/// characters the 85 threshold is only reachable at a perfect partial ratio,
/// which fires whenever the phrase merely contains the token ("the" inside
/// "authentic").
const MIN_FUZZY_TOKEN_LEN: usize = 4;

pub struct RedFlagDetector {
    phrases: Vec<String>,
    fuzzy_threshold: u32,
    metrics: Box<dyn TextMetrics>,
    token_re: Regex,
}

impl RedFlagDetector {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_metrics(config, Box::new(FuzzyMetrics::new()))
    }

    pub fn with_metrics(config: &AnalyzerConfig, metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            phrases: config
                .red_flag_phrases
                .iter()
                .map(|phrase| normalize_text(phrase))
                .collect(),
            fuzzy_threshold: config.fuzzy_token_threshold,
            metrics,
            token_re: Regex::new(r"\b\w+\b").unwrap(),
        }
    }

    /// Scan one piece of text; each phrase fires at most once per call.
    pub fn scan(&self, text: &str) -> Vec<Issue> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let tokens: Vec<String> = self
            .token_re
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect();
        let stemmed: HashSet<String> =
            tokens.iter().map(|token| self.metrics.stem(token)).collect();

        let mut issues = Vec::new();
        for phrase in &self.phrases {
            if let Some(label) = self.match_phrase(phrase, &normalized, &tokens, &stemmed) {
                debug!("red flag '{label}' in text starting '{:.40}'", normalized);
                issues.push(Issue::minor(format!("Red-flag phrase: {label}")));
            }
        }
        issues
    }

    fn match_phrase(
        &self,
        phrase: &str,
        text: &str,
        tokens: &[String],
        stemmed: &HashSet<String>,
    ) -> Option<String> {
        // 1. Exact substring of the normalized text.
        if text.contains(phrase) {
            return Some(phrase.to_string());
        }

        // 2. Adjacent word pair, for exactly-two-word phrases.
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.len() == 2 {
            let adjacent = tokens
                .windows(2)
                .any(|pair| pair[0] == words[0] && pair[1] == words[1]);
            if adjacent {
                return Some(format!("[bigram match: {phrase}]"));
            }
        }

        // 3. Any single token close to the phrase under partial ratio.
        for token in tokens {
            if token.chars().count() >= MIN_FUZZY_TOKEN_LEN
                && self.metrics.partial_similarity(token, phrase) >= self.fuzzy_threshold
            {
                return Some(format!("[fuzzy match: {phrase}]"));
            }
        }

        // 4. Every stemmed phrase token present in the stemmed input set.
        let phrase_stems: Vec<String> = self
            .token_re
            .find_iter(phrase)
            .map(|m| self.metrics.stem(m.as_str()))
            .collect();
        if !phrase_stems.is_empty() && phrase_stems.iter().all(|stem| stemmed.contains(stem)) {
            return Some(format!("[stem match: {phrase}]"));
        }

        None
    }
}
