//! # dblp-bibmerge
//!
//! Fetches BibTeX from DBLP for a group of authors and combines it into one
//! de-duplicated file, optionally restricted to a range of publication years.
//!
//! ## Architecture
//!
//! - [`bibtex`]: pure record parsing, year filtering, merging and report rendering
//! - [`models`]: records, author batches, year ranges and merge results
//! - [`sources`]: the [`sources::BibSource`] trait and its DBLP implementation
//! - [`pipeline`]: sequential per-author retrieval with injected progress reporting
//! - [`utils`]: authors file loading, HTTP client, retry with backoff
//! - [`config`]: configuration management
//! - [`ui`]: terminal output

pub mod bibtex;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod sources;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use bibtex::{combine, merge, Combined};
pub use models::{AuthorBatch, MergedResult, Record, YearRange};
pub use pipeline::{Pipeline, Reporter};
pub use sources::{BibSource, DblpSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
