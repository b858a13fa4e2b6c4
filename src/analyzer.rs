//! Listing analysis facade.
//!
//! Owns the individual detectors and produces the final scored result.
//! Analysis is a pure synchronous computation: no I/O, no state retained
//! between calls, deterministic for identical input.

use crate::config::AnalyzerConfig;
use crate::red_flags::RedFlagDetector;
use crate::reviews::ReviewAnalyzer;
use crate::scoring::{render_explanations, score_issues, Issue};
use crate::spec_checks::SpecMismatchChecker;
use crate::spec_keys::SpecKeyCorrector;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A product listing to analyze.
///
/// Every field is optional on the wire; missing fields deserialize to empty
/// values and are never a fault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specs: HashMap<String, String>,
    #[serde(default)]
    pub reviews: Vec<String>,
}

/// Final analysis output: a bounded confidence score plus ordered
/// human-readable explanations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub confidence_score: u8,
    pub explanations: Vec<String>,
}

/// Issues from one analysis call, grouped by category.
///
/// The batch report needs per-category counts; [`IssueSet::into_ordered`]
/// flattens the groups in the documented order.
#[derive(Debug, Clone, Default)]
pub struct IssueSet {
    pub spec_issues: Vec<Issue>,
    pub duplicate_review_issues: Vec<Issue>,
    pub red_flag_issues: Vec<Issue>,
    pub unknown_key_issues: Vec<Issue>,
}

impl IssueSet {
    /// Flatten in the fixed documented order: spec mismatches, duplicate
    /// reviews, red flags, unknown keys.
    pub fn into_ordered(self) -> Vec<Issue> {
        let mut issues = self.spec_issues;
        issues.extend(self.duplicate_review_issues);
        issues.extend(self.red_flag_issues);
        issues.extend(self.unknown_key_issues);
        issues
    }
}

pub struct ListingAnalyzer {
    corrector: SpecKeyCorrector,
    checker: SpecMismatchChecker,
    detector: RedFlagDetector,
    reviews: ReviewAnalyzer,
}

impl ListingAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            corrector: SpecKeyCorrector::new(config),
            checker: SpecMismatchChecker::new(),
            detector: RedFlagDetector::new(config),
            reviews: ReviewAnalyzer::new(),
        }
    }

    /// Run every detector and return the categorized issues.
    pub fn analyze_issues(&self, listing: &Listing) -> IssueSet {
        let (specs, unknown_key_issues) = self.corrector.normalize_keys(&listing.specs);
        let spec_issues = self.checker.check(&specs, &listing.description);

        let mut red_flag_issues = self.detector.scan(&listing.title);
        red_flag_issues.extend(self.detector.scan(&listing.description));
        let (duplicate_review_issues, review_red_flags) =
            self.reviews.analyze(&listing.reviews, &self.detector);
        red_flag_issues.extend(review_red_flags);

        debug!(
            "listing {:?}: {} spec, {} duplicate, {} red-flag, {} unknown-key issue(s)",
            listing.product_id,
            spec_issues.len(),
            duplicate_review_issues.len(),
            red_flag_issues.len(),
            unknown_key_issues.len()
        );

        IssueSet {
            spec_issues,
            duplicate_review_issues,
            red_flag_issues,
            unknown_key_issues,
        }
    }

    /// Analyze a listing and aggregate everything into the final result.
    pub fn analyze(&self, listing: &Listing) -> AnalysisResult {
        let issues = self.analyze_issues(listing).into_ordered();
        AnalysisResult {
            confidence_score: score_issues(&issues),
            explanations: render_explanations(&issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> ListingAnalyzer {
        ListingAnalyzer::new(&AnalyzerConfig::default())
    }

    fn specs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_listing_scores_85() {
        // An entirely empty listing still has no brand.
        let result = analyzer().analyze(&Listing::default());
        assert_eq!(result.confidence_score, 85);
        assert_eq!(result.explanations, vec!["Critical: Brand not specified"]);
    }

    #[test]
    fn low_price_and_oversized_storage_score_75() {
        let listing = Listing {
            specs: specs(&[("brand", "Sony"), ("price", "50"), ("storage", "999GB")]),
            ..Listing::default()
        };
        let result = analyzer().analyze(&listing);
        assert_eq!(result.confidence_score, 75);
        assert!(result
            .explanations
            .contains(&"Critical: Price suspiciously low".to_string()));
        assert!(result
            .explanations
            .contains(&"Warning: Storage value unusually high".to_string()));
    }

    #[test]
    fn fake_description_without_brand_scores_80() {
        let listing = Listing {
            description: "this is a fake".to_string(),
            ..Listing::default()
        };
        let result = analyzer().analyze(&listing);
        assert_eq!(result.confidence_score, 80);
        assert!(result
            .explanations
            .contains(&"Critical: Brand not specified".to_string()));
        assert!(result
            .explanations
            .contains(&"Minor: Red-flag phrase: fake".to_string()));
    }

    #[test]
    fn repeated_review_scores_90() {
        let listing = Listing {
            specs: specs(&[("brand", "Sony")]),
            reviews: vec!["Great product".to_string(), "Great product".to_string()],
            ..Listing::default()
        };
        let result = analyzer().analyze(&listing);
        assert_eq!(result.confidence_score, 90);
        assert_eq!(
            result.explanations,
            vec!["Warning: Repeated review: Great product"]
        );
    }

    #[test]
    fn misspelled_storage_key_corrects_silently() {
        let listing = Listing {
            specs: specs(&[("brand", "Sony"), ("Strage", "256GB")]),
            ..Listing::default()
        };
        let result = analyzer().analyze(&listing);
        assert_eq!(result.confidence_score, 100);
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn issue_order_is_specs_then_duplicates_then_red_flags_then_unknown_keys() {
        let listing = Listing {
            description: "a fake".to_string(),
            specs: specs(&[("price", "5"), ("condition", "new")]),
            reviews: vec!["Great product".to_string(), "Great product".to_string()],
            ..Listing::default()
        };
        let result = analyzer().analyze(&listing);
        assert_eq!(
            result.explanations,
            vec![
                "Critical: Brand not specified",
                "Critical: Price suspiciously low",
                "Warning: Repeated review: Great product",
                "Minor: Red-flag phrase: fake",
                "Warning: Unknown spec key: 'condition'",
            ]
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        let listing = Listing {
            title: "Nike Air Max".to_string(),
            description: "First copy of Nike shoes, original sole".to_string(),
            specs: specs(&[("brand", "unknown"), ("Pirce", "40"), ("extra", "x")]),
            reviews: vec![
                "First copy".to_string(),
                "Looks original".to_string(),
                "Bit fake".to_string(),
            ],
            ..Listing::default()
        };
        let analyzer = analyzer();
        let first = analyzer.analyze(&listing);
        let second = analyzer.analyze(&listing);
        assert_eq!(first, second);
    }

    #[test]
    fn score_stays_in_bounds_under_many_issues() {
        let listing = Listing {
            description: "fake replica knockoff dupe first copy clone version".to_string(),
            specs: specs(&[("price", "1"), ("storage", "junk"), ("weird key", "v")]),
            reviews: vec!["fake".to_string(); 20],
            ..Listing::default()
        };
        let result = analyzer().analyze(&listing);
        assert!(result.confidence_score <= 100);
    }

    #[test]
    fn listing_deserializes_with_missing_fields() {
        let listing: Listing = serde_json::from_str("{}").unwrap();
        assert!(listing.title.is_empty());
        assert!(listing.specs.is_empty());
        assert!(listing.reviews.is_empty());
        assert!(listing.product_id.is_none());

        let listing: Listing =
            serde_json::from_str(r#"{"product_id":"B001","title":"iPhone"}"#).unwrap();
        assert_eq!(listing.product_id.as_deref(), Some("B001"));
        assert_eq!(listing.title, "iPhone");
    }

    #[test]
    fn title_and_description_are_both_scanned() {
        let listing = Listing {
            title: "Premium replica watch".to_string(),
            description: "a knockoff of the real thing".to_string(),
            specs: specs(&[("brand", "Seiko")]),
            ..Listing::default()
        };
        let set = analyzer().analyze_issues(&listing);
        let messages: Vec<&str> = set
            .red_flag_issues
            .iter()
            .map(|i| i.message.as_str())
            .collect();
        assert!(messages.contains(&"Red-flag phrase: replica"));
        assert!(messages.contains(&"Red-flag phrase: knockoff"));
    }
}
