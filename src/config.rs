//! Mining thresholds and run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, MiningError, Result};
use crate::ingest::PeriodFilter;
use crate::report::Language;

/// Thresholds for one mining run.
///
/// Defaults match the borrowing-analysis application: 2% support,
/// 10% confidence and a lift floor of 1.0 (independence or better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub min_support: f64,
    pub min_confidence: f64,
    pub min_lift: f64,
    /// Largest itemset size to mine; `None` is unbounded.
    pub max_len: Option<usize>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            min_support: 0.02,
            min_confidence: 0.10,
            min_lift: 1.0,
            max_len: None,
        }
    }
}

impl Thresholds {
    pub fn new(min_support: f64, min_confidence: f64) -> Self {
        Thresholds {
            min_support,
            min_confidence,
            ..Default::default()
        }
    }

    pub fn with_min_lift(mut self, min_lift: f64) -> Self {
        self.min_lift = min_lift;
        self
    }

    pub fn with_max_len(mut self, max_len: Option<usize>) -> Self {
        self.max_len = max_len;
        self
    }

    /// Reject NaN, infinities and out-of-range values before any work starts.
    pub fn validate(&self) -> Result<()> {
        unit_interval("min_support", self.min_support)?;
        unit_interval("min_confidence", self.min_confidence)?;
        if !self.min_lift.is_finite() || self.min_lift < 0.0 {
            return Err(MiningError::invalid_threshold(
                "min_lift",
                self.min_lift,
                "a finite value >= 0",
            ));
        }
        if self.max_len == Some(0) {
            return Err(MiningError::InvalidMaxLen);
        }
        Ok(())
    }
}

fn unit_interval(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MiningError::invalid_threshold(name, value, "a value in [0, 1]"))
    }
}

/// Full configuration for a CLI run, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    pub thresholds: Thresholds,
    pub period: PeriodFilter,
    pub language: Language,
}

impl MiningConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> std::result::Result<Self, IngestError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
