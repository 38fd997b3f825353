//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::ResolvedAuthor;
use crate::sources::{BibSource, SourceError};

#[derive(Debug, Default)]
struct MockState {
    authors: HashMap<String, ResolvedAuthor>,
    bibtex: HashMap<String, Result<String, String>>,
    fetched: Vec<String>,
}

/// A mock source that serves predefined authors and BibTeX.
///
/// Unknown names resolve to `None`; unknown PIDs fail with `NotFound`.
#[derive(Debug, Default)]
pub struct MockSource {
    state: Mutex<MockState>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `name` resolve to the given canonical name and PID.
    pub fn add_author(&self, name: &str, resolved_name: &str, pid: &str) {
        self.state().authors.insert(
            name.to_string(),
            ResolvedAuthor {
                name: resolved_name.to_string(),
                pid: pid.to_string(),
            },
        );
    }

    /// Serve `bibtex` for `pid`.
    pub fn set_bibtex(&self, pid: &str, bibtex: &str) {
        self.state()
            .bibtex
            .insert(pid.to_string(), Ok(bibtex.to_string()));
    }

    /// Fail retrieval for `pid` with an API error.
    pub fn set_failure(&self, pid: &str, message: &str) {
        self.state()
            .bibtex
            .insert(pid.to_string(), Err(message.to_string()));
    }

    /// PIDs passed to `fetch_bibtex`, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.state().fetched.clone()
    }
}

#[async_trait]
impl BibSource for MockSource {
    async fn resolve_author(&self, name: &str) -> Result<Option<ResolvedAuthor>, SourceError> {
        Ok(self.state().authors.get(name).cloned())
    }

    async fn fetch_bibtex(&self, pid: &str) -> Result<String, SourceError> {
        let mut state = self.state();
        state.fetched.push(pid.to_string());

        match state.bibtex.get(pid) {
            Some(Ok(bibtex)) => Ok(bibtex.clone()),
            Some(Err(message)) => Err(SourceError::Api(message.clone())),
            None => Err(SourceError::NotFound(format!("PID {}", pid))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source() {
        let source = MockSource::new();
        source.add_author("Jane", "Jane Doe", "12/3456");
        source.set_bibtex("12/3456", "@misc{K1,\n}\n");
        source.set_failure("99/9999", "boom");

        let author = source.resolve_author("Jane").await.unwrap().unwrap();
        assert_eq!(author.pid, "12/3456");
        assert!(source.resolve_author("Unknown").await.unwrap().is_none());

        assert_eq!(source.fetch_bibtex("12/3456").await.unwrap(), "@misc{K1,\n}\n");
        assert!(matches!(
            source.fetch_bibtex("99/9999").await,
            Err(SourceError::Api(_))
        ));
        assert!(matches!(
            source.fetch_bibtex("00/0000").await,
            Err(SourceError::NotFound(_))
        ));
        assert_eq!(source.fetched(), vec!["12/3456", "99/9999", "00/0000"]);
    }
}
