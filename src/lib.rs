pub mod analyzer;
pub mod config;
pub mod form;
pub mod normalize;
pub mod red_flags;
pub mod report;
pub mod reviews;
pub mod scoring;
pub mod similarity;
pub mod spec_checks;
pub mod spec_keys;

pub use analyzer::{AnalysisResult, IssueSet, Listing, ListingAnalyzer};
pub use config::AnalyzerConfig;
pub use red_flags::RedFlagDetector;
pub use scoring::{render_explanations, score_issues, Issue, Severity};
pub use similarity::{FuzzyMetrics, TextMetrics};
