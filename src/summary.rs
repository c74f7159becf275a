use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ingest::BorrowRecord;

/// Headline counts for a selection of borrowing records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Distinct non-blank categories.
    pub total_categories: usize,
    /// Distinct borrow timestamps.
    pub total_transactions: usize,
    /// Borrow count per category, most borrowed first, ties by name.
    pub borrows_per_category: Vec<(String, usize)>,
}

impl DatasetSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BorrowRecord>,
    {
        let mut per_category: BTreeMap<&str, usize> = BTreeMap::new();
        let mut timestamps = BTreeSet::new();
        for r in records {
            timestamps.insert(r.borrowed_at);
            let label = r.category.trim();
            if !label.is_empty() {
                *per_category.entry(label).or_default() += 1;
            }
        }

        let mut borrows_per_category: Vec<(String, usize)> = per_category
            .into_iter()
            .map(|(label, n)| (label.to_string(), n))
            .collect();
        borrows_per_category.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        DatasetSummary {
            total_categories: borrows_per_category.len(),
            total_transactions: timestamps.len(),
            borrows_per_category,
        }
    }
}
