//! Review pattern analysis.
//!
//! Two independent signals: verbatim-duplicate reviews, and red-flag
//! phrases inside individual reviews.

use crate::red_flags::RedFlagDetector;
use crate::scoring::Issue;
use log::debug;
use std::collections::HashSet;

pub struct ReviewAnalyzer;

impl ReviewAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Returns (duplicate-review issues, red-flag issues).
    ///
    /// A review is repeated when its trimmed text is byte-identical to an
    /// earlier review. Each distinct repeated value yields exactly one
    /// warning no matter how often it recurs. Red flags are collected per
    /// individual review, not over the concatenation.
    pub fn analyze(
        &self,
        reviews: &[String],
        detector: &RedFlagDetector,
    ) -> (Vec<Issue>, Vec<Issue>) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut reported: HashSet<&str> = HashSet::new();
        let mut duplicates = Vec::new();
        let mut red_flags = Vec::new();

        for review in reviews {
            let trimmed = review.trim();
            if !seen.insert(trimmed) && reported.insert(trimmed) {
                debug!("repeated review: {trimmed}");
                duplicates.push(Issue::warning(format!("Repeated review: {trimmed}")));
            }
            red_flags.extend(detector.scan(review));
        }

        (duplicates, red_flags)
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
