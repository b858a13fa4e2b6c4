//! Parsing helpers for the manual-entry form.
//!
//! The interactive mode collects specs as "key: value" lines and reviews as
//! one line each; these helpers turn those blocks into `Listing` fields.

use std::collections::HashMap;

/// Parse a block of "key: value" lines into a spec mapping.
///
/// Lines without a colon are skipped; keys are lowercased and values
/// trimmed.
pub fn parse_spec_block(block: &str) -> HashMap<String, String> {
    let mut specs = HashMap::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_lowercase();
            if !key.is_empty() {
                specs.insert(key, value.trim().to_string());
            }
        }
    }
    specs
}

/// Parse one review per line, dropping blank lines.
pub fn parse_review_block(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
