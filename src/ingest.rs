//! Borrowing records: loading, period selection and grouping into
//! transactions.
//!
//! A transaction is every category borrowed at one borrow timestamp.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::encoder::Transaction;
use crate::error::IngestError;

const MONTHS_ID: [&str; 12] = [
    "januari",
    "februari",
    "maret",
    "april",
    "mei",
    "juni",
    "juli",
    "agustus",
    "september",
    "oktober",
    "november",
    "desember",
];
const MONTHS_EN: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// One borrowing event as exported by the library system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRecord {
    #[serde(alias = "Tgl Pinjam", deserialize_with = "deserialize_timestamp")]
    pub borrowed_at: NaiveDateTime,
    #[serde(alias = "Kategori")]
    pub category: String,
    #[serde(alias = "Judul", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BorrowRecord {
    pub fn new(borrowed_at: NaiveDateTime, category: impl Into<String>) -> Self {
        BorrowRecord {
            borrowed_at,
            category: category.into(),
            title: None,
        }
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, IngestError> {
    let s = raw.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|_| IngestError::InvalidTimestamp {
            value: raw.to_string(),
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Read a JSON array of borrowing records.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<BorrowRecord>, IngestError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let records: Vec<BorrowRecord> = serde_json::from_str(&raw)?;
    debug!(path = %path.display(), records = records.len(), "loaded borrowing records");
    Ok(records)
}

/// Month number from `"3"`, `"maret"` or `"March"`.
pub fn parse_month(raw: &str) -> Result<u32, IngestError> {
    let s = raw.trim().to_lowercase();
    if let Ok(n) = s.parse::<u32>() {
        return if (1..=12).contains(&n) {
            Ok(n)
        } else {
            Err(IngestError::InvalidMonth(n))
        };
    }
    MONTHS_ID
        .iter()
        .position(|&m| m == s)
        .or_else(|| MONTHS_EN.iter().position(|&m| m == s))
        .map(|i| i as u32 + 1)
        .ok_or_else(|| IngestError::UnknownMonth(raw.trim().to_string()))
}

/// Optional calendar year and month restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl PeriodFilter {
    pub fn new(year: Option<i32>, month: Option<u32>) -> Self {
        PeriodFilter { year, month }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    /// Apply the year first, then the month.
    ///
    /// A year with no records selects nothing; a month with no records
    /// is [`IngestError::EmptyPeriod`].
    pub fn select<'a>(
        &self,
        records: &'a [BorrowRecord],
    ) -> Result<Vec<&'a BorrowRecord>, IngestError> {
        let mut selected: Vec<&BorrowRecord> = match self.year {
            Some(year) => records
                .iter()
                .filter(|r| r.borrowed_at.year() == year)
                .collect(),
            None => records.iter().collect(),
        };

        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(IngestError::InvalidMonth(month));
            }
            selected.retain(|r| r.borrowed_at.month() == month);
            if selected.is_empty() {
                return Err(IngestError::EmptyPeriod {
                    year: self.year,
                    month,
                });
            }
        }
        Ok(selected)
    }
}

/// One transaction per distinct borrow timestamp, in timestamp order.
///
/// Category labels are trimmed; blank labels are dropped, and a
/// timestamp left with no categories produces no transaction.
pub fn group_transactions<'a, I>(records: I) -> Vec<Transaction>
where
    I: IntoIterator<Item = &'a BorrowRecord>,
{
    let mut grouped: BTreeMap<NaiveDateTime, BTreeSet<String>> = BTreeMap::new();
    for r in records {
        let label = r.category.trim();
        let items = grouped.entry(r.borrowed_at).or_default();
        if !label.is_empty() {
            items.insert(label.to_string());
        }
    }
    grouped
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(at, items)| Transaction {
            id: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            items,
        })
        .collect()
}
