//! Sequential per-author retrieval feeding the merge.
//!
//! Authors are processed one at a time: resolve the PID if missing, fetch
//! the BibTeX, split it into records, apply the year range. Failed authors
//! are skipped. Progress goes to an injected [`Reporter`] so the console
//! output stays out of the merge code.

use chrono::NaiveDateTime;
use std::sync::Mutex;
use std::time::Duration;

use crate::bibtex::{combine, filter_batch, Combined};
use crate::models::{AuthorBatch, AuthorEntry, YearRange};
use crate::sources::BibSource;

/// Why an author was left out of the merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Name lookup returned no match
    NotFound,
    /// Name lookup failed
    LookupFailed(String),
    /// BibTeX retrieval failed
    FetchFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::LookupFailed(e) => write!(f, "lookup failed: {}", e),
            SkipReason::FetchFailed(e) => write!(f, "fetch failed: {}", e),
        }
    }
}

/// Progress events emitted while a run is in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Started {
        authors: usize,
        range: YearRange,
    },
    AuthorStarted {
        index: usize,
        total: usize,
        name: String,
    },
    AuthorSkipped {
        name: String,
        reason: SkipReason,
    },
    AuthorFetched {
        name: String,
        pid: String,
        count: usize,
    },
    AuthorFiltered {
        name: String,
        kept: usize,
        total: usize,
    },
    Merging {
        batches: usize,
    },
}

/// Sink for pipeline progress
pub trait Reporter: Send + Sync {
    fn report(&self, event: &PipelineEvent);
}

/// Reporter that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: &PipelineEvent) {}
}

/// Reporter that keeps every event, for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Errors that end a run without output
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No authors found")]
    NoAuthors,

    #[error("No publications fetched for any of {requested} authors")]
    NothingFetched { requested: usize },
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub authors_requested: usize,
    pub authors_processed: usize,
    pub combined: Combined,
}

impl RunSummary {
    /// Entries collected before de-duplication
    pub fn total_collected(&self) -> usize {
        self.combined.merged.total_raw
    }

    pub fn unique(&self) -> usize {
        self.combined.merged.unique_count()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.combined.merged.duplicates_removed()
    }
}

/// Drives retrieval for a list of authors
pub struct Pipeline<'a> {
    source: &'a dyn BibSource,
    reporter: &'a dyn Reporter,
    range: YearRange,
    request_delay: Duration,
}

impl<'a> Pipeline<'a> {
    pub fn new(source: &'a dyn BibSource, reporter: &'a dyn Reporter) -> Self {
        Self {
            source,
            reporter,
            range: YearRange::unbounded(),
            request_delay: Duration::ZERO,
        }
    }

    /// Restrict records to an inclusive year range
    pub fn with_range(mut self, range: YearRange) -> Self {
        self.range = range;
        self
    }

    /// Pause between consecutive authors
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Fetch every author and merge the results.
    ///
    /// Fails only when there are no authors or nothing could be fetched.
    pub async fn run(
        &self,
        authors: &[AuthorEntry],
        generated_at: NaiveDateTime,
    ) -> Result<RunSummary, PipelineError> {
        if authors.is_empty() {
            return Err(PipelineError::NoAuthors);
        }

        let batches = self.collect(authors).await;
        if batches.is_empty() {
            return Err(PipelineError::NothingFetched {
                requested: authors.len(),
            });
        }

        self.reporter.report(&PipelineEvent::Merging {
            batches: batches.len(),
        });
        let combined = combine(&batches, &self.range, generated_at);

        Ok(RunSummary {
            authors_requested: authors.len(),
            authors_processed: batches.len(),
            combined,
        })
    }

    /// Fetch every author in order, returning the batches that succeeded
    pub async fn collect(&self, authors: &[AuthorEntry]) -> Vec<AuthorBatch> {
        self.reporter.report(&PipelineEvent::Started {
            authors: authors.len(),
            range: self.range,
        });

        let mut batches = Vec::with_capacity(authors.len());

        for (idx, author) in authors.iter().enumerate() {
            self.reporter.report(&PipelineEvent::AuthorStarted {
                index: idx + 1,
                total: authors.len(),
                name: author.name.clone(),
            });

            match self.fetch_author(author).await {
                Ok(batch) => batches.push(batch),
                Err(reason) => {
                    tracing::warn!("Skipping {}: {}", author.name, reason);
                    self.reporter.report(&PipelineEvent::AuthorSkipped {
                        name: author.name.clone(),
                        reason,
                    });
                }
            }

            if idx + 1 < authors.len() && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        batches
    }

    async fn fetch_author(&self, author: &AuthorEntry) -> Result<AuthorBatch, SkipReason> {
        let (name, pid) = match &author.pid {
            Some(pid) => (author.name.clone(), pid.clone()),
            None => match self.source.resolve_author(&author.name).await {
                Ok(Some(resolved)) => (resolved.name, resolved.pid),
                Ok(None) => return Err(SkipReason::NotFound),
                Err(e) => return Err(SkipReason::LookupFailed(e.to_string())),
            },
        };

        let raw = self
            .source
            .fetch_bibtex(&pid)
            .await
            .map_err(|e| SkipReason::FetchFailed(e.to_string()))?;

        let batch = AuthorBatch::from_bibtex(name.clone(), Some(pid.clone()), &raw);
        tracing::info!("Retrieved {} publications for {}", batch.len(), name);
        self.reporter.report(&PipelineEvent::AuthorFetched {
            name: name.clone(),
            pid,
            count: batch.len(),
        });

        if self.range.is_unbounded() {
            return Ok(batch);
        }

        let total = batch.len();
        let filtered = filter_batch(batch, &self.range);
        self.reporter.report(&PipelineEvent::AuthorFiltered {
            name,
            kept: filtered.len(),
            total,
        });

        Ok(filtered)
    }
}
