//! Rendering of the combined BibTeX document.

use chrono::NaiveDateTime;

use crate::models::{MergedResult, YearRange};

const TITLE: &str = "DBLP Publications - Combined BibTeX";

/// Render the merged records with a commented provenance header.
///
/// The caller supplies `generated_at` so output is reproducible.
pub fn build_report(merged: &MergedResult, range: &YearRange, generated_at: NaiveDateTime) -> String {
    let mut out = String::new();

    out.push_str(&format!("% {}\n", TITLE));
    out.push_str(&format!(
        "% Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&format!("% Total Authors: {}\n", merged.author_count()));
    if let Some(years) = range.describe() {
        out.push_str(&format!("% Year Range: {}\n", years));
    }

    out.push_str("%\n");
    out.push_str("% Authors included:\n");
    for author in &merged.author_counts {
        out.push_str(&format!("% - {}: {} publications\n", author.name, author.count));
    }

    out.push_str("%\n");
    out.push_str(&format!(
        "% Total entries (before de-duplication): {}\n",
        merged.total_raw
    ));
    out.push_str(&format!(
        "% Unique publications (after de-duplication): {}\n",
        merged.unique_count()
    ));
    out.push_str(&format!("% Duplicates removed: {}\n", merged.duplicates_removed()));
    out.push_str("%\n");
    out.push_str("% NOTE: Duplicates occur when multiple authors from this group\n");
    out.push_str("%       co-author papers together.\n");
    out.push_str("%\n% ========================================\n\n");

    let body: Vec<String> = merged.records.iter().map(|r| r.to_bibtex()).collect();
    out.push_str(&body.join("\n"));
    out.push('\n');

    out
}
