//! Error types for mining and record ingestion.
//!
//! Empty input, an empty frequent-itemset table and a rule set that is
//! filtered down to nothing are all normal outcomes and are returned as
//! empty collections, never as errors.

use thiserror::Error;

/// Errors raised by the mining pipeline.
#[derive(Debug, Error)]
pub enum MiningError {
    /// A threshold is NaN, infinite or outside its valid range.
    #[error("Invalid threshold {name} = {value}: expected {expected}")]
    InvalidThreshold {
        /// Name of the offending threshold
        name: &'static str,
        /// Value that was supplied
        value: f64,
        /// Human-readable description of the valid range
        expected: &'static str,
    },

    /// `max_len` was set to zero.
    #[error("Invalid max_len: must be at least 1 when set")]
    InvalidMaxLen,

    /// A subset of a frequent itemset has no recorded support.
    #[error("Missing support for itemset {itemset:?}; the itemset table is not downward closed")]
    MissingSupport {
        /// Column indices of the missing itemset
        itemset: Vec<u32>,
    },
}

impl MiningError {
    /// Create an InvalidThreshold error.
    pub fn invalid_threshold(name: &'static str, value: f64, expected: &'static str) -> Self {
        Self::InvalidThreshold {
            name,
            value,
            expected,
        }
    }
}

/// Errors raised while loading and selecting borrowing records.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A borrow timestamp could not be parsed.
    #[error("Invalid borrow timestamp: {value:?}")]
    InvalidTimestamp { value: String },

    /// Month outside 1..=12.
    #[error("Invalid month {0}: expected 1..=12")]
    InvalidMonth(u32),

    /// Month name that is neither English nor Indonesian.
    #[error("Unknown month name {0:?}")]
    UnknownMonth(String),

    /// The selected month contains no borrowing records.
    #[error("No transactions in month {month}{}", year_suffix(.year))]
    EmptyPeriod { year: Option<i32>, month: u32 },
}

fn year_suffix(year: &Option<i32>) -> String {
    year.map(|y| format!(" of {y}")).unwrap_or_default()
}

/// Result type for mining operations.
pub type Result<T> = std::result::Result<T, MiningError>;
