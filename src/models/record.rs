//! A single BibTeX record as retrieved from DBLP.

use serde::{Deserialize, Serialize};

use crate::bibtex::{extract_key, extract_year, RECORD_MARKER};

/// One bibliographic entry.
///
/// `text` holds the entry exactly as it appeared in the retrieved BibTeX,
/// without the leading record marker. The key and year are derived once at
/// construction; either may be absent when the entry is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    text: String,
    key: Option<String>,
    year: Option<i32>,
}

impl Record {
    /// Parse a record fragment (as produced by [`crate::bibtex::split_records`])
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let key = extract_key(&text);
        let year = extract_year(&text);
        Self { text, key, year }
    }

    /// The entry text without the leading marker
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Citation key, if the opening declaration could be parsed
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Publication year, if a `year` field could be parsed
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// The entry re-prefixed with the record marker, ready for output
    pub fn to_bibtex(&self) -> String {
        format!("{}{}", RECORD_MARKER, self.text)
    }
}
