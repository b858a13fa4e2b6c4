//! Issue model and score aggregation.
//!
//! Every detector in the crate reports findings as [`Issue`] values tagged
//! with a [`Severity`]. The confidence score is a pure function of the
//! severity multiset: 100 minus a fixed penalty per issue, clamped to 0.

use serde::{Deserialize, Serialize};

/// Qualitative weight of a detected issue.
///
/// Closed enumeration with an explicit penalty table so that adding a new
/// severity forces a conscious edit of the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Minor,
}

impl Severity {
    /// Points subtracted from the confidence score per issue of this severity.
    pub fn penalty(self) -> u32 {
        match self {
            Severity::Critical => 15,
            Severity::Warning => 10,
            Severity::Minor => 5,
        }
    }

    /// Title-cased label used when rendering explanations.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Minor => "Minor",
        }
    }
}

/// A single detected problem with a listing.
///
/// Issues carry no identity beyond their content; independently raised
/// duplicates are kept and each one counts toward the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    pub severity: Severity,
}

impl Issue {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Critical)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Warning)
    }

    pub fn minor(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Minor)
    }
}

/// Compute the confidence score for a set of issues.
///
/// Starts at 100, subtracts each issue's penalty, and clamps at 0. Only the
/// severities matter; messages never influence the score.
pub fn score_issues(issues: &[Issue]) -> u8 {
    let penalty: u32 = issues.iter().map(|issue| issue.severity.penalty()).sum();
    100u32.saturating_sub(penalty) as u8
}

/// Render issues as severity-prefixed explanation lines, preserving order.
pub fn render_explanations(issues: &[Issue]) -> Vec<String> {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.severity.label(), issue.message))
        .collect()
}
