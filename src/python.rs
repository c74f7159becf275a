use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::Thresholds;
use crate::encoder::Transaction;
use crate::pipeline::mine_and_derive_rules;

type RuleTuple = (Vec<String>, Vec<String>, f64, f64, f64);

/// Mine ranked association rules from a list of baskets.
///
/// Returns `(antecedent, consequent, support, confidence, lift)` tuples
/// in presentation order.
#[pyfunction]
#[pyo3(signature = (transactions, min_support, min_confidence, min_lift=1.0, max_len=None))]
pub fn mine_rules(
    py: Python<'_>,
    transactions: Vec<Vec<String>>,
    min_support: f64,
    min_confidence: f64,
    min_lift: f64,
    max_len: Option<usize>,
) -> PyResult<Vec<RuleTuple>> {
    let thresholds = Thresholds::new(min_support, min_confidence)
        .with_min_lift(min_lift)
        .with_max_len(max_len);
    let txns: Vec<Transaction> = transactions
        .into_iter()
        .enumerate()
        .map(|(i, items)| Transaction::new(i.to_string(), items))
        .collect();

    let rules = py
        .allow_threads(|| mine_and_derive_rules(&txns, &thresholds))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(rules
        .into_iter()
        .map(|r| (r.antecedent, r.consequent, r.support, r.confidence, r.lift))
        .collect())
}

#[pymodule]
fn _shelfmine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mine_rules, m)?)?;
    Ok(())
}
