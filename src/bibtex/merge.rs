//! First-seen de-duplication across author batches.

use std::collections::HashSet;

use crate::models::{AuthorBatch, AuthorCount, MergedResult};

/// Merge author batches into one de-duplicated, ordered collection.
///
/// Batches are visited in input order and records in retrieval order. The
/// first record with a given key wins; later records with the same key are
/// discarded, whichever author they came from. Keys compare by exact string
/// equality. Records without a key are always kept.
pub fn merge(batches: &[AuthorBatch]) -> MergedResult {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();
    let mut author_counts = Vec::with_capacity(batches.len());
    let mut total_raw = 0;

    for batch in batches {
        author_counts.push(AuthorCount {
            name: batch.display_name.clone(),
            count: batch.len(),
        });
        total_raw += batch.len();

        for record in &batch.records {
            match record.key() {
                Some(key) => {
                    if seen.insert(key) {
                        records.push(record.clone());
                    }
                }
                None => records.push(record.clone()),
            }
        }
    }

    MergedResult {
        records,
        total_raw,
        author_counts,
    }
}
