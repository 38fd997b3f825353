//! Author entries and the per-author record batches built from them.

use serde::{Deserialize, Serialize};

use crate::bibtex::split_records;
use crate::models::Record;

/// An author as listed in the authors file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// Name as written by the user
    pub name: String,

    /// DBLP person identifier, when given explicitly
    pub pid: Option<String>,
}

impl AuthorEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pid: None,
        }
    }

    pub fn with_pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = Some(pid.into());
        self
    }
}

/// An author found through a remote name lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAuthor {
    /// Canonical name reported by the remote service
    pub name: String,

    /// DBLP person identifier
    pub pid: String,
}

/// The records retrieved for one author.
///
/// Built once after retrieval and consumed by the merge step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorBatch {
    /// Name shown in the report header
    pub display_name: String,

    /// DBLP person identifier the records were fetched with
    pub external_id: Option<String>,

    /// Records in retrieval order
    pub records: Vec<Record>,
}

impl AuthorBatch {
    pub fn new(
        display_name: impl Into<String>,
        external_id: Option<String>,
        records: Vec<Record>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            external_id,
            records,
        }
    }

    /// Split raw BibTeX text into records and wrap them in a batch
    pub fn from_bibtex(
        display_name: impl Into<String>,
        external_id: Option<String>,
        raw: &str,
    ) -> Self {
        let records = split_records(raw).into_iter().map(Record::parse).collect();
        Self::new(display_name, external_id, records)
    }

    /// Number of records before any de-duplication
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
