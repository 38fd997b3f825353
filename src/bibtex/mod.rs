//! BibTeX merge pipeline.
//!
//! Everything in this module is pure: no I/O, no clock, no logging. Malformed
//! record text never produces an error; it only yields absent keys or years.
//!
//! - [`split_records`], [`extract_key`], [`extract_year`]: record parsing
//! - [`filter_by_year`]: inclusive year-range filtering
//! - [`merge`]: first-seen de-duplication across author batches
//! - [`build_report`]: the combined output document
//! - [`combine`]: merge and render in one call

mod filter;
mod merge;
mod parser;
mod report;

pub use filter::{filter_batch, filter_by_year};
pub use merge::merge;
pub use parser::{extract_key, extract_year, split_records, RECORD_MARKER};
pub use report::build_report;

use chrono::NaiveDateTime;

use crate::models::{AuthorBatch, MergedResult, YearRange};

/// Output of [`combine`]
#[derive(Debug, Clone)]
pub struct Combined {
    pub merged: MergedResult,
    pub report: String,
}

/// Merge already-filtered batches and render the report.
///
/// `range` only feeds the report header; batches are expected to have been
/// filtered with it beforehand.
pub fn combine(batches: &[AuthorBatch], range: &YearRange, generated_at: NaiveDateTime) -> Combined {
    let merged = merge(batches);
    let report = build_report(&merged, range, generated_at);
    Combined { merged, report }
}
