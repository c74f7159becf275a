use serde::Serialize;
use tracing::trace;

use crate::apriori::FrequentItemsets;
use crate::encoder::Item;
use crate::error::{MiningError, Result};

/// Directional rule `antecedent -> consequent` with its metrics.
///
/// Item lists are in column (label) order. `conviction` is `+inf` when
/// confidence is 1; JSON output writes that as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

/// Append every `size`-subset of `items[start..]` extended from `prefix`,
/// in lexicographic position order.
fn push_antecedents(
    items: &[u32],
    size: usize,
    start: usize,
    prefix: &mut Vec<u32>,
    out: &mut Vec<Vec<u32>>,
) {
    if prefix.len() == size {
        out.push(prefix.clone());
        return;
    }
    let remaining = size - prefix.len();
    for pos in start..=items.len() - remaining {
        prefix.push(items[pos]);
        push_antecedents(items, size, pos + 1, prefix, out);
        prefix.pop();
    }
}

/// Every (antecedent, consequent) split of `itemset`, by increasing
/// antecedent size and then lexicographically. Both sides stay sorted.
fn rule_combinations(itemset: &[u32]) -> Vec<(Vec<u32>, Vec<u32>)> {
    let n = itemset.len();
    let mut antecedents = Vec::with_capacity((1usize << n.min(20)).saturating_sub(2));
    let mut prefix = Vec::with_capacity(n);
    for ant_size in 1..n {
        push_antecedents(itemset, ant_size, 0, &mut prefix, &mut antecedents);
    }
    antecedents
        .into_iter()
        .map(|ant| {
            let con: Vec<u32> = itemset
                .iter()
                .filter(|x| ant.binary_search(x).is_err())
                .copied()
                .collect();
            (ant, con)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Metrics {
    confidence: f64,
    lift: f64,
    leverage: f64,
    conviction: f64,
}

/// `None` when the antecedent or consequent never occurs, which only
/// happens for tables mined with `min_support = 0`.
#[inline]
fn compute_metrics(s_ac: f64, s_a: f64, s_c: f64) -> Option<Metrics> {
    if s_a == 0.0 || s_c == 0.0 {
        return None;
    }
    let confidence = s_ac / s_a;
    let lift = confidence / s_c;
    let leverage = s_ac - s_a * s_c;
    let conviction = if confidence >= 1.0 {
        f64::INFINITY
    } else {
        (1.0 - s_c) / (1.0 - confidence)
    };
    Some(Metrics {
        confidence,
        lift,
        leverage,
        conviction,
    })
}

/// Derive every candidate rule from the frequent itemsets of size >= 2.
///
/// Each split of each itemset is considered exactly once. Rules whose
/// antecedent or consequent has zero support are dropped, not raised.
pub fn generate_rules(frequent: &FrequentItemsets) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    let mut degenerate = 0usize;

    for iset in frequent.iter().filter(|f| f.len() >= 2) {
        let s_ac = iset.support;
        for (ant, con) in rule_combinations(&iset.items) {
            let s_a = frequent
                .support_of(&ant)
                .ok_or_else(|| MiningError::MissingSupport { itemset: ant.clone() })?;
            let s_c = frequent
                .support_of(&con)
                .ok_or_else(|| MiningError::MissingSupport { itemset: con.clone() })?;

            let Some(m) = compute_metrics(s_ac, s_a, s_c) else {
                degenerate += 1;
                trace!(
                    antecedent = ?ant,
                    consequent = ?con,
                    "dropping rule with zero-support side"
                );
                continue;
            };
            rules.push(Rule {
                antecedent: frequent.labels(&ant),
                consequent: frequent.labels(&con),
                antecedent_support: s_a,
                consequent_support: s_c,
                support: s_ac,
                confidence: m.confidence,
                lift: m.lift,
                leverage: m.leverage,
                conviction: m.conviction,
            });
        }
    }

    if degenerate > 0 {
        trace!(degenerate, "degenerate candidate rules dropped");
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apriori::mine_frequent_itemsets;
    use crate::config::Thresholds;
    use crate::encoder::encode_baskets;

    #[test]
    fn test_rule_combinations_order() {
        let splits = rule_combinations(&[1, 4, 7]);
        assert_eq!(
            splits,
            vec![
                (vec![1], vec![4, 7]),
                (vec![4], vec![1, 7]),
                (vec![7], vec![1, 4]),
                (vec![1, 4], vec![7]),
                (vec![1, 7], vec![4]),
                (vec![4, 7], vec![1]),
            ]
        );
        assert!(rule_combinations(&[3]).is_empty());
    }

    #[test]
    fn test_split_count_per_itemset() {
        for n in 2..=6u32 {
            let items: Vec<u32> = (0..n).collect();
            let splits = rule_combinations(&items);
            assert_eq!(splits.len(), (1 << n) - 2);
            let mut antecedents: Vec<_> = splits.iter().map(|(a, _)| a.clone()).collect();
            antecedents.sort();
            antecedents.dedup();
            assert_eq!(antecedents.len(), splits.len());
        }
    }

    #[test]
    fn test_metrics() {
        let m = compute_metrics(0.25, 0.5, 0.4).unwrap();
        assert_eq!(m.confidence, 0.5);
        assert!((m.lift - 1.25).abs() < 1e-12);
        assert!((m.leverage - 0.05).abs() < 1e-12);
        assert!((m.conviction - 1.2).abs() < 1e-12);

        let sure = compute_metrics(0.3, 0.3, 0.6).unwrap();
        assert_eq!(sure.confidence, 1.0);
        assert!(sure.conviction.is_infinite());

        assert!(compute_metrics(0.0, 0.0, 0.5).is_none());
        assert!(compute_metrics(0.0, 0.5, 0.0).is_none());
    }

    #[test]
    fn test_generate_rules_two_items() {
        let m = encode_baskets(&[vec!["Fiksi", "Sains"], vec!["Fiksi", "Sains"], vec!["Sains"]]);
        let fi = mine_frequent_itemsets(&m, &Thresholds::new(0.5, 0.0)).unwrap();
        let rules = generate_rules(&fi).unwrap();

        assert_eq!(rules.len(), 2);
        let fwd = &rules[0];
        assert_eq!(fwd.antecedent, vec!["Fiksi"]);
        assert_eq!(fwd.consequent, vec!["Sains"]);
        assert_eq!(fwd.support, 2.0 / 3.0);
        assert_eq!(fwd.confidence, 1.0);
        assert_eq!(fwd.lift, 1.0);

        let back = &rules[1];
        assert_eq!(back.antecedent, vec!["Sains"]);
        assert!((back.confidence - 2.0 / 3.0).abs() < 1e-12);
        assert!((back.lift - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_support_rules_dropped() {
        let m = encode_baskets(&[vec!["a"], vec!["b"], vec!["c"]]);
        let fi = mine_frequent_itemsets(&m, &Thresholds::new(0.0, 0.0)).unwrap();
        assert_eq!(fi.len(), 7);

        // Pairs never co-occur but both sides do: confidence 0, lift 0.
        // Every split of {a, b, c} has a zero-support side and is dropped.
        let rules = generate_rules(&fi).unwrap();
        assert_eq!(rules.len(), 6);
        assert!(rules.iter().all(|r| r.confidence == 0.0 && r.lift == 0.0));
        assert!(rules.iter().all(|r| r.antecedent.len() + r.consequent.len() == 2));
    }

    #[test]
    fn test_missing_subset_support_is_an_error() {
        let fi = FrequentItemsets::from_counts(
            vec!["a".into(), "b".into()],
            2,
            vec![(vec![0], 2), (vec![0, 1], 1)],
        );
        let err = generate_rules(&fi).unwrap_err();
        assert!(matches!(err, MiningError::MissingSupport { itemset } if itemset == vec![1]));
    }
}
