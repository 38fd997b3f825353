//! Remote bibliography sources.
//!
//! This module defines the [`BibSource`] trait, the seam between the merge
//! pipeline and whatever service supplies BibTeX. [`DblpSource`] talks to
//! dblp.org; [`MockSource`] serves canned responses for tests.
//!
//! # Implementing a New Source
//!
//! 1. Create a struct that implements `BibSource`
//! 2. Implement `resolve_author` to map a name to the source's person id
//! 3. Implement `fetch_bibtex` to return the raw BibTeX for that id
//!
//! Retry and rate-limit handling belong to the source, not the caller.

mod dblp;
pub mod mock;

pub use dblp::{DblpSource, DBLP_BASE_URL};
pub use mock::MockSource;

use crate::models::ResolvedAuthor;
use async_trait::async_trait;

/// A service that can look up authors and return their BibTeX
#[async_trait]
pub trait BibSource: Send + Sync + std::fmt::Debug {
    /// Look up an author by name.
    ///
    /// Returns `Ok(None)` when the service has no match.
    async fn resolve_author(&self, name: &str) -> Result<Option<ResolvedAuthor>, SourceError>;

    /// Retrieve the raw BibTeX for a person id
    async fn fetch_bibtex(&self, pid: &str) -> Result<String, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Parsing error (JSON, etc.)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded, with the server's retry-after hint in seconds
    #[error("Rate limit exceeded")]
    RateLimit(Option<u64>),

    /// Author or record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// API error from the source
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}
