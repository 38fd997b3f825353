//! Inclusive publication-year range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive year range where either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    /// Create a range, rejecting a start year after the end year
    pub fn new(start: Option<i32>, end: Option<i32>) -> Result<Self, RangeError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(RangeError::Inverted { start: s, end: e });
            }
        }
        Ok(Self { start, end })
    }

    /// A range with no bounds; filtering with it is the identity
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// True when neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check whether a year falls inside the range
    pub fn contains(&self, year: i32) -> bool {
        self.start.map_or(true, |s| year >= s) && self.end.map_or(true, |e| year <= e)
    }

    /// Header form of the range: `2020-2024`, `2020+` or `up to 2024`
    pub fn describe(&self) -> Option<String> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(format!("{}-{}", s, e)),
            (Some(s), None) => Some(format!("{}+", s)),
            (None, Some(e)) => Some(format!("up to {}", e)),
            (None, None) => None,
        }
    }
}

/// Console form, e.g. `2020 to now`
impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self
            .start
            .map(|s| s.to_string())
            .unwrap_or_else(|| "start".to_string());
        let end = self
            .end
            .map(|e| e.to_string())
            .unwrap_or_else(|| "now".to_string());
        write!(f, "{} to {}", start, end)
    }
}

/// Errors constructing a [`YearRange`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Start year ({start}) cannot be greater than end year ({end})")]
    Inverted { start: i32, end: i32 },
}
