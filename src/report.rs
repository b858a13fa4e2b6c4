//! Batch analysis: JSON listings in, CSV report out.
//!
//! Each listing is analyzed independently in input order; the report keeps
//! one row per listing with its score and per-category issue counts.

use crate::analyzer::{Listing, ListingAnalyzer};
use crate::scoring::score_issues;
use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

/// One report row, derived from a single listing's analysis.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub product_id: String,
    pub title: String,
    pub confidence_score: u8,
    pub spec_issues: usize,
    pub review_issues: usize,
    pub red_flag_issues: usize,
    pub unknown_key_issues: usize,
}

impl ReportRow {
    pub fn total_issues(&self) -> usize {
        self.spec_issues + self.review_issues + self.red_flag_issues + self.unknown_key_issues
    }
}

/// Load a JSON array of listings.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read listings file {}", path.display()))?;
    let listings: Vec<Listing> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse listings file {}", path.display()))?;
    Ok(listings)
}

/// Analyze every listing and build the report rows in input order.
pub fn analyze_batch(analyzer: &ListingAnalyzer, listings: &[Listing]) -> Vec<ReportRow> {
    listings
        .iter()
        .map(|listing| {
            let set = analyzer.analyze_issues(listing);
            let spec_issues = set.spec_issues.len();
            let review_issues = set.duplicate_review_issues.len();
            let red_flag_issues = set.red_flag_issues.len();
            let unknown_key_issues = set.unknown_key_issues.len();
            ReportRow {
                product_id: listing
                    .product_id
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                title: listing.title.clone(),
                confidence_score: score_issues(&set.into_ordered()),
                spec_issues,
                review_issues,
                red_flag_issues,
                unknown_key_issues,
            }
        })
        .collect()
}

/// Render the rows as CSV.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut csv = String::from(
        "product_id,title,confidence_score,spec_issues,review_issues,red_flag_issues,unknown_key_issues,total_issues\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            escape_csv_field(&row.product_id),
            escape_csv_field(&row.title),
            row.confidence_score,
            row.spec_issues,
            row.review_issues,
            row.red_flag_issues,
            row.unknown_key_issues,
            row.total_issues()
        ));
    }
    csv
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Full batch run: load, analyze, write the CSV, print a summary.
pub fn run_batch(analyzer: &ListingAnalyzer, input: &Path, output: &Path) -> Result<()> {
    let listings = load_listings(input)?;
    info!("loaded {} listing(s) from {}", listings.len(), input.display());

    let rows = analyze_batch(analyzer, &listings);
    fs::write(output, render_csv(&rows))
        .with_context(|| format!("failed to write report {}", output.display()))?;

    println!("Batch analysis summary:");
    for row in &rows {
        println!(
            "  {:<10} score {:>3}  issues {:>2}  {}",
            row.product_id,
            row.confidence_score,
            row.total_issues(),
            row.title
        );
    }
    println!("Report saved to {}", output.display());
    Ok(())
}
