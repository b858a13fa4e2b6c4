//! Domain heuristics over the corrected spec mapping.
//!
//! Every rule is evaluated independently; parse failures become issues,
//! never errors.

use crate::normalize::{normalize_spec_value, normalize_text};
use crate::scoring::Issue;
use crate::spec_keys::NormalizedSpecs;
use log::debug;

/// Brand values that count as "not specified".
const PLACEHOLDER_BRANDS: [&str; 4] = ["unknown", "na", "not mentioned", ""];

/// Storage capacities above this many units are treated as implausible.
const MAX_PLAUSIBLE_STORAGE: u64 = 512;

/// Prices below this are suspicious regardless of currency unit.
const MIN_PLAUSIBLE_PRICE: f64 = 100.0;

pub struct SpecMismatchChecker;

impl SpecMismatchChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, specs: &NormalizedSpecs, description: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        let description = normalize_text(description);

        let brand_missing = specs
            .get("brand")
            .map_or(true, |brand| {
                PLACEHOLDER_BRANDS.contains(&normalize_text(brand).as_str())
            });
        if brand_missing {
            issues.push(Issue::critical("Brand not specified"));
        }

        if let Some(price) = specs.get("price") {
            match normalize_spec_value(price).parse::<f64>() {
                Ok(value) if value < MIN_PLAUSIBLE_PRICE => {
                    debug!("implausible price {value}");
                    issues.push(Issue::critical("Price suspiciously low"));
                }
                Ok(_) => {}
                Err(_) => issues.push(Issue::warning("Price not numeric")),
            }
        }

        if let Some(storage) = specs.get("storage") {
            let value = normalize_spec_value(storage);

            // Narrow literal rule: only the 128GB-vs-64 combination is
            // checked, not general numeric disagreement.
            if description.contains("128gb") && value.contains("64") {
                issues.push(Issue::warning("Storage mismatch with description"));
            }

            let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                issues.push(Issue::warning("Storage format invalid"));
            } else if digits.parse::<u64>().map_or(true, |n| n > MAX_PLAUSIBLE_STORAGE) {
                // Overflow means the value is certainly out of range.
                issues.push(Issue::warning("Storage value unusually high"));
            }
        }

        issues
    }
}

impl Default for SpecMismatchChecker {
    fn default() -> Self {
        Self::new()
    }
}
