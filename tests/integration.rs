//! Integration tests for shelfmine

use std::io::Write;

use shelfmine::{
    analyze, group_transactions, load_records, mine_and_derive_rules, render_borrow_chart, report,
    DatasetSummary, Language, PeriodFilter, Thresholds, Transaction,
};
use tempfile::NamedTempFile;

/// Borrowing export with the library system's original column names.
fn create_records_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let rows = [
        ("2023-01-02", "Fiksi"),
        ("2023-01-02", "Sains"),
        ("2023-01-03", "Fiksi"),
        ("2023-01-03", "Sains"),
        ("2023-01-03", "Fiksi"),
        ("2023-01-04", "Sains"),
        ("2023-01-05", "Sejarah"),
        ("2023-01-05", "Agama"),
        ("2023-02-01", "Sejarah"),
        ("2023-02-01", "Agama"),
        ("2023-02-02", "Sejarah"),
        ("2023-02-02", "Agama"),
        ("2023-02-02", "Fiksi"),
        ("2022-11-11", "Komik"),
    ];
    let body: Vec<String> = rows
        .iter()
        .map(|(at, cat)| format!(r#"{{"Tgl Pinjam": "{at}", "Kategori": "{cat}"}}"#))
        .collect();
    write!(file, "[{}]", body.join(",\n")).unwrap();
    file
}

#[test]
fn test_end_to_end_pipeline() {
    let file = create_records_file();
    let records = load_records(file.path()).unwrap();
    assert_eq!(records.len(), 14);

    let selected = PeriodFilter::new(Some(2023), None).select(&records).unwrap();
    let summary = DatasetSummary::from_records(selected.iter().copied());
    assert_eq!(summary.total_categories, 4);
    assert_eq!(summary.total_transactions, 6);

    let chart_dir = tempfile::tempdir().unwrap();
    let chart_path = chart_dir.path().join("borrows.svg");
    render_borrow_chart(&summary, &chart_path, Language::English).unwrap();
    let svg = std::fs::read_to_string(&chart_path).unwrap();
    assert!(svg.contains("Sejarah"));

    let transactions = group_transactions(selected.iter().copied());
    assert_eq!(transactions.len(), 6);

    let analysis = analyze(&transactions, &Thresholds::new(0.3, 0.6)).unwrap();
    // Sejarah and Agama always go together: 3 of 6 days
    let top = &analysis.rules[0];
    assert_eq!(top.confidence, 1.0);
    assert_eq!(top.support, 0.5);
    assert_eq!(top.lift, 2.0);
    assert!(analysis
        .rules
        .iter()
        .all(|r| r.confidence >= 0.6 && r.lift >= 1.0));

    let rows = report::rows(&analysis.rules, Language::Indonesian);
    assert_eq!(rows[0].rule, "Jika meminjam buku Agama, maka cenderung meminjam buku Sejarah.");
    let html = report::render_html(&rows, Language::Indonesian);
    assert!(html.contains("Jika meminjam buku Agama"));
}

#[test]
fn test_month_selection() {
    let file = create_records_file();
    let records = load_records(file.path()).unwrap();

    let feb = PeriodFilter::new(Some(2023), Some(2)).select(&records).unwrap();
    let transactions = group_transactions(feb.iter().copied());
    assert_eq!(transactions.len(), 2);

    let rules = mine_and_derive_rules(&transactions, &Thresholds::new(1.0, 1.0)).unwrap();
    let pairs: Vec<(String, String)> = rules
        .iter()
        .map(|r| (r.antecedent.join(","), r.consequent.join(",")))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Agama".to_string(), "Sejarah".to_string()),
            ("Sejarah".to_string(), "Agama".to_string()),
        ]
    );

    let empty_month = PeriodFilter::new(Some(2023), Some(7)).select(&records);
    assert!(empty_month.is_err());
}

#[test]
fn test_support_threshold_prunes_before_rules() {
    let mut transactions = vec![Transaction::new("0", ["Atlas", "Kamus"])];
    for i in 1..10 {
        transactions.push(Transaction::new(i.to_string(), ["Novel"]));
    }
    let analysis = analyze(&transactions, &Thresholds::new(0.2, 0.0).with_min_lift(0.0)).unwrap();
    assert_eq!(analysis.frequent.len(), 1);
    assert_eq!(analysis.candidate_rules, 0);
    assert!(analysis.no_rules_found());

    // The same pair yields a perfect rule once the support floor admits it
    let rules = mine_and_derive_rules(&transactions, &Thresholds::new(0.1, 0.0)).unwrap();
    assert!(rules.iter().any(|r| r.antecedent == ["Atlas"] && r.confidence == 1.0));
}

#[test]
fn test_zero_support_on_empty_input() {
    let rules = mine_and_derive_rules(&[], &Thresholds::new(0.0, 0.0)).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_json_export_round_trips_metrics() {
    let transactions = vec![
        Transaction::new("T1", ["Fiksi", "Sains"]),
        Transaction::new("T2", ["Fiksi", "Sains"]),
        Transaction::new("T3", ["Sains"]),
    ];
    let rules = mine_and_derive_rules(&transactions, &Thresholds::new(0.5, 0.7)).unwrap();
    let json = report::render_json(&rules).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["antecedent"][0], "Fiksi");
    assert_eq!(value[0]["lift"], 1.0);
}
