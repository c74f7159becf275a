//! End-to-end mining: transactions -> matrix -> itemsets -> ranked rules.
//!
//! Each call is a pure function of its inputs. Thresholds are validated
//! before any work; an empty transaction list produces an empty result.

use tracing::info;

use crate::apriori::{mine_frequent_itemsets, FrequentItemsets};
use crate::association_rules::{generate_rules, Rule};
use crate::config::Thresholds;
use crate::encoder::{encode, Transaction};
use crate::error::Result;
use crate::ranking::{filter_and_rank, RuleFilter};

/// Output of one mining run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub frequent: FrequentItemsets,
    /// Candidate rules before filtering.
    pub candidate_rules: usize,
    /// Filtered rules in presentation order.
    pub rules: Vec<Rule>,
}

impl Analysis {
    /// True when the run finished but no rule passed the thresholds.
    pub fn no_rules_found(&self) -> bool {
        self.rules.is_empty()
    }
}

pub fn analyze(transactions: &[Transaction], thresholds: &Thresholds) -> Result<Analysis> {
    thresholds.validate()?;

    let matrix = encode(transactions);
    let frequent = mine_frequent_itemsets(&matrix, thresholds)?;
    let candidates = generate_rules(&frequent)?;
    let candidate_rules = candidates.len();
    let rules = filter_and_rank(candidates, &RuleFilter::from(thresholds));

    info!(
        transactions = matrix.n_transactions(),
        items = matrix.n_items(),
        frequent_itemsets = frequent.len(),
        candidate_rules,
        rules = rules.len(),
        "mining finished"
    );

    Ok(Analysis {
        frequent,
        candidate_rules,
        rules,
    })
}

/// Mine frequent itemsets and return the filtered, ranked rules.
pub fn mine_and_derive_rules(
    transactions: &[Transaction],
    thresholds: &Thresholds,
) -> Result<Vec<Rule>> {
    analyze(transactions, thresholds).map(|a| a.rules)
}
