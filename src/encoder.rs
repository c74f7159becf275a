//! Transaction encoding: raw baskets to a column-wise presence matrix.

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::bitset::BitSet;

/// Item label, e.g. a book category.
pub type Item = String;

/// One transaction: an identifier and the distinct items it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub items: BTreeSet<Item>,
}

impl Transaction {
    /// Build a transaction; repeated items collapse to a single presence.
    pub fn new<I, S>(id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Item>,
    {
        Transaction {
            id: id.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Boolean transaction × item matrix stored as one bit column per item.
///
/// Columns follow the lexicographic order of the item labels, so column
/// index order and label order agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMatrix {
    universe: Vec<Item>,
    columns: Vec<BitSet>,
    n_transactions: usize,
}

impl EncodedMatrix {
    pub fn n_items(&self) -> usize {
        self.universe.len()
    }

    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    /// Distinct items observed, in column order.
    pub fn universe(&self) -> &[Item] {
        &self.universe
    }

    /// Transactions containing item `col`.
    pub fn column(&self, col: usize) -> &BitSet {
        &self.columns[col]
    }

    pub fn columns(&self) -> &[BitSet] {
        &self.columns
    }

    pub fn contains(&self, transaction: usize, col: usize) -> bool {
        self.columns
            .get(col)
            .is_some_and(|c| c.get(transaction))
    }

    /// Presence row for one transaction, one entry per universe item.
    pub fn row(&self, transaction: usize) -> Vec<bool> {
        self.columns.iter().map(|c| c.get(transaction)).collect()
    }

    pub fn item_index(&self, label: &str) -> Option<usize> {
        self.universe
            .binary_search_by(|known| known.as_str().cmp(label))
            .ok()
    }
}

/// Encode transactions into a presence matrix.
pub fn encode(transactions: &[Transaction]) -> EncodedMatrix {
    encode_rows(transactions.iter().map(|t| t.items.iter().map(String::as_str)))
}

/// Encode raw baskets of labels; duplicates within a basket are ignored.
pub fn encode_baskets<B, S>(baskets: &[B]) -> EncodedMatrix
where
    B: AsRef<[S]>,
    S: AsRef<str>,
{
    encode_rows(baskets.iter().map(|b| b.as_ref().iter().map(|s| s.as_ref())))
}

fn encode_rows<'a, R, I>(rows: R) -> EncodedMatrix
where
    R: Iterator<Item = I> + Clone,
    I: Iterator<Item = &'a str>,
{
    let universe: Vec<Item> = rows
        .clone()
        .flatten()
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let index: AHashMap<&str, usize> = universe
        .iter()
        .enumerate()
        .map(|(i, item)| (item.as_str(), i))
        .collect();

    let n_transactions = rows.clone().count();
    let mut columns = vec![BitSet::new(n_transactions); universe.len()];
    for (t, row) in rows.enumerate() {
        for label in row {
            if let Some(&col) = index.get(label) {
                columns[col].set(t);
            }
        }
    }

    EncodedMatrix {
        universe,
        columns,
        n_transactions,
    }
}
