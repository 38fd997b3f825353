//! The de-duplicated union of all author batches.

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Pre-dedup record count for one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub name: String,
    pub count: usize,
}

/// Ordered unique records plus provenance counters.
///
/// Records keep first-seen order across authors, and authors keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedResult {
    pub records: Vec<Record>,
    pub total_raw: usize,
    pub author_counts: Vec<AuthorCount>,
}

impl MergedResult {
    /// Number of records that survived de-duplication
    pub fn unique_count(&self) -> usize {
        self.records.len()
    }

    /// `total_raw - unique_count`, never below zero for hand-built values
    pub fn duplicates_removed(&self) -> usize {
        self.total_raw.saturating_sub(self.records.len())
    }

    /// Number of authors that contributed a batch
    pub fn author_count(&self) -> usize {
        self.author_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
