//! Threshold filtering and deterministic ordering of rules.

use std::cmp::Ordering;

use crate::association_rules::Rule;
use crate::config::Thresholds;

/// Confidence and lift floors; both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleFilter {
    pub min_confidence: f64,
    pub min_lift: f64,
}

impl RuleFilter {
    pub fn new(min_confidence: f64, min_lift: f64) -> Self {
        RuleFilter {
            min_confidence,
            min_lift,
        }
    }

    #[inline]
    pub fn accepts(&self, rule: &Rule) -> bool {
        rule.confidence >= self.min_confidence && rule.lift >= self.min_lift
    }
}

impl From<&Thresholds> for RuleFilter {
    fn from(t: &Thresholds) -> Self {
        RuleFilter::new(t.min_confidence, t.min_lift)
    }
}

/// Keep the rules that pass `filter`, preserving their order.
pub fn filter_rules(rules: Vec<Rule>, filter: &RuleFilter) -> Vec<Rule> {
    rules.into_iter().filter(|r| filter.accepts(r)).collect()
}

/// Presentation order: confidence, lift and support descending, then
/// antecedent and consequent labels ascending.
pub fn compare_rules(a: &Rule, b: &Rule) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.lift.total_cmp(&a.lift))
        .then_with(|| b.support.total_cmp(&a.support))
        .then_with(|| a.antecedent.cmp(&b.antecedent))
        .then_with(|| a.consequent.cmp(&b.consequent))
}

pub fn rank_rules(rules: &mut [Rule]) {
    rules.sort_by(compare_rules);
}

pub fn filter_and_rank(rules: Vec<Rule>, filter: &RuleFilter) -> Vec<Rule> {
    let mut kept = filter_rules(rules, filter);
    rank_rules(&mut kept);
    kept
}
