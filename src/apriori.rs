//! Level-wise Apriori search for frequent itemsets.
//!
//! Itemsets are sorted `Vec<u32>` of column indices into the encoded
//! matrix. Level k candidates come from joining level k-1 itemsets that
//! share their first k-2 items, are pruned when any (k-1)-subset is not
//! frequent, and are then counted against the item columns.

use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use tracing::debug;

use crate::bitset::BitSet;
use crate::config::Thresholds;
use crate::encoder::{EncodedMatrix, Item};
use crate::error::Result;

const PAR_CANDIDATES_CUTOFF: usize = 64;

/// An itemset together with its absolute count and relative support.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    /// Sorted column indices.
    pub items: Vec<u32>,
    pub count: u64,
    pub support: f64,
}

impl FrequentItemset {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Every frequent itemset of one run, ordered by size and then by column
/// order, with O(1) support lookup by itemset.
#[derive(Debug, Clone)]
pub struct FrequentItemsets {
    universe: Vec<Item>,
    n_transactions: usize,
    itemsets: Vec<FrequentItemset>,
    index: AHashMap<Vec<u32>, usize>,
}

impl FrequentItemsets {
    /// Build a table from `(itemset, count)` pairs.
    ///
    /// Each itemset is sorted; support is `count / n_transactions`.
    pub fn from_counts(
        universe: Vec<Item>,
        n_transactions: usize,
        counts: Vec<(Vec<u32>, u64)>,
    ) -> Self {
        let n = n_transactions as f64;
        let mut itemsets: Vec<FrequentItemset> = counts
            .into_iter()
            .map(|(mut items, count)| {
                items.sort_unstable();
                let support = if n_transactions == 0 { 0.0 } else { count as f64 / n };
                FrequentItemset {
                    items,
                    count,
                    support,
                }
            })
            .collect();
        itemsets.sort_unstable_by(|a, b| {
            a.items
                .len()
                .cmp(&b.items.len())
                .then_with(|| a.items.cmp(&b.items))
        });
        let index = itemsets
            .iter()
            .enumerate()
            .map(|(i, f)| (f.items.clone(), i))
            .collect();
        FrequentItemsets {
            universe,
            n_transactions,
            itemsets,
            index,
        }
    }

    fn empty(universe: Vec<Item>, n_transactions: usize) -> Self {
        Self::from_counts(universe, n_transactions, Vec::new())
    }

    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    pub fn universe(&self) -> &[Item] {
        &self.universe
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequentItemset> {
        self.itemsets.iter()
    }

    pub fn as_slice(&self) -> &[FrequentItemset] {
        &self.itemsets
    }

    /// Itemsets of exactly `size` items.
    pub fn level(&self, size: usize) -> &[FrequentItemset] {
        let start = self.itemsets.partition_point(|f| f.len() < size);
        let end = self.itemsets.partition_point(|f| f.len() <= size);
        &self.itemsets[start..end]
    }

    /// Size of the largest frequent itemset, 0 when empty.
    pub fn max_level(&self) -> usize {
        self.itemsets.last().map_or(0, FrequentItemset::len)
    }

    /// Lookup by sorted column indices.
    pub fn get(&self, items: &[u32]) -> Option<&FrequentItemset> {
        self.index.get(items).map(|&i| &self.itemsets[i])
    }

    pub fn support_of(&self, items: &[u32]) -> Option<f64> {
        self.get(items).map(|f| f.support)
    }

    /// Item labels of `itemset`, in column order.
    pub fn labels(&self, items: &[u32]) -> Vec<Item> {
        items
            .iter()
            .map(|&c| self.universe[c as usize].clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a FrequentItemsets {
    type Item = &'a FrequentItemset;
    type IntoIter = std::slice::Iter<'a, FrequentItemset>;

    fn into_iter(self) -> Self::IntoIter {
        self.itemsets.iter()
    }
}

/// Run Apriori over `matrix` with `thresholds.min_support` and the
/// optional `thresholds.max_len`.
///
/// An itemset is kept when `count / n >= min_support` under plain IEEE
/// comparison. With `min_support = 0` every candidate survives, including
/// itemsets that never occur. An empty matrix yields an empty table.
pub fn mine_frequent_itemsets(
    matrix: &EncodedMatrix,
    thresholds: &Thresholds,
) -> Result<FrequentItemsets> {
    thresholds.validate()?;

    let n_transactions = matrix.n_transactions();
    let universe = matrix.universe().to_vec();
    if n_transactions == 0 || matrix.n_items() == 0 {
        return Ok(FrequentItemsets::empty(universe, n_transactions));
    }

    let n = n_transactions as f64;
    let min_support = thresholds.min_support;
    let is_frequent = |count: u64| count as f64 / n >= min_support;

    let mut current: Vec<(Vec<u32>, u64)> = matrix
        .columns()
        .iter()
        .enumerate()
        .map(|(col, bs)| (vec![col as u32], bs.count_ones()))
        .filter(|&(_, count)| is_frequent(count))
        .collect();
    debug!(
        level = 1,
        candidates = matrix.n_items(),
        frequent = current.len(),
        "apriori level done"
    );

    let mut found: Vec<(Vec<u32>, u64)> = Vec::new();
    let mut level = 1usize;
    while !current.is_empty() {
        if thresholds.max_len.is_some_and(|ml| level >= ml) {
            found.append(&mut current);
            break;
        }

        let prev: Vec<&[u32]> = current.iter().map(|(items, _)| items.as_slice()).collect();
        let join = join_and_prune(&prev);
        level += 1;

        let next: Vec<(Vec<u32>, u64)> = count_support(matrix, join.candidates)
            .into_iter()
            .filter(|&(_, count)| is_frequent(count))
            .collect();
        debug!(
            level,
            joined = join.joined,
            pruned = join.pruned,
            frequent = next.len(),
            "apriori level done"
        );

        found.append(&mut current);
        current = next;
    }

    Ok(FrequentItemsets::from_counts(universe, n_transactions, found))
}

#[derive(Debug, Default)]
pub(crate) struct JoinOutcome {
    /// Surviving candidates, sorted and unique.
    pub candidates: Vec<Vec<u32>>,
    /// Candidates produced by the join before pruning.
    pub joined: usize,
    /// Candidates dropped because a (k-1)-subset is not frequent.
    pub pruned: usize,
}

/// Join step plus subset pruning over one level of sorted itemsets.
///
/// Itemsets are bucketed by their (k-2)-prefix; every pair of last items
/// inside a bucket yields one k-candidate, so each candidate is produced
/// exactly once.
pub(crate) fn join_and_prune(prev: &[&[u32]]) -> JoinOutcome {
    let Some(first) = prev.first() else {
        return JoinOutcome::default();
    };
    let width = first.len();
    if width == 0 {
        return JoinOutcome::default();
    }

    let mut buckets: AHashMap<&[u32], Vec<u32>> = AHashMap::new();
    for &iset in prev {
        let (prefix, last) = iset.split_at(width - 1);
        buckets.entry(prefix).or_default().push(last[0]);
    }
    let known: AHashSet<&[u32]> = prev.iter().copied().collect();

    let mut outcome = JoinOutcome::default();
    let mut scratch = Vec::with_capacity(width);
    for (prefix, mut tails) in buckets {
        tails.sort_unstable();
        for (i, &a) in tails.iter().enumerate() {
            for &b in &tails[i + 1..] {
                outcome.joined += 1;
                let mut candidate = Vec::with_capacity(width + 1);
                candidate.extend_from_slice(prefix);
                candidate.push(a);
                candidate.push(b);
                if has_infrequent_subset(&candidate, &known, &mut scratch) {
                    outcome.pruned += 1;
                } else {
                    outcome.candidates.push(candidate);
                }
            }
        }
    }
    outcome.candidates.sort_unstable();
    outcome.candidates.dedup();
    outcome
}

/// Dropping either of the last two items gives back a joined parent, so
/// only the prefix positions need checking.
fn has_infrequent_subset(
    candidate: &[u32],
    known: &AHashSet<&[u32]>,
    scratch: &mut Vec<u32>,
) -> bool {
    let k = candidate.len();
    (0..k.saturating_sub(2)).any(|skip| {
        scratch.clear();
        scratch.extend_from_slice(&candidate[..skip]);
        scratch.extend_from_slice(&candidate[skip + 1..]);
        !known.contains(scratch.as_slice())
    })
}

fn count_support(matrix: &EncodedMatrix, candidates: Vec<Vec<u32>>) -> Vec<(Vec<u32>, u64)> {
    let count = |items: &[u32]| {
        let cols: Vec<&BitSet> = items.iter().map(|&c| matrix.column(c as usize)).collect();
        BitSet::intersection_count(&cols)
    };
    if candidates.len() >= PAR_CANDIDATES_CUTOFF {
        candidates
            .into_par_iter()
            .map(|items| {
                let c = count(items.as_slice());
                (items, c)
            })
            .collect()
    } else {
        candidates
            .into_iter()
            .map(|items| {
                let c = count(items.as_slice());
                (items, c)
            })
            .collect()
    }
}
