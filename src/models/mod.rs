//! Core data models for bibliography records and merge results.

mod author;
mod merged;
mod range;
mod record;

pub use author::{AuthorBatch, AuthorEntry, ResolvedAuthor};
pub use merged::{AuthorCount, MergedResult};
pub use range::{RangeError, YearRange};
pub use record::Record;
