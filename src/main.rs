//! Shelfmine CLI: load borrowing records, select a period, mine rules and
//! print or export them.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use shelfmine::{
    analyze, group_transactions, load_records, render_borrow_chart, report, Args, DatasetSummary,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(not(feature = "python"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cfg = args.resolve_config()?;
    let start_time = Instant::now();

    let records = load_records(&args.input)
        .with_context(|| format!("failed to load records from {}", args.input.display()))?;
    let selected = cfg.period.select(&records)?;
    info!(
        loaded = records.len(),
        selected = selected.len(),
        year = ?cfg.period.year,
        month = ?cfg.period.month,
        whole_dataset = cfg.period.is_unrestricted(),
        "records selected"
    );

    let summary = DatasetSummary::from_records(selected.iter().copied());
    println!("=== Dataset ===");
    println!("Total categories:   {}", summary.total_categories);
    println!("Total transactions: {}", summary.total_transactions);
    for (category, borrows) in &summary.borrows_per_category {
        println!("  {:<30} {:>6}", category, borrows);
    }

    let transactions = group_transactions(selected.iter().copied());
    let analysis = analyze(&transactions, &cfg.thresholds)?;

    println!("\n=== Apriori Results ===");
    println!(
        "min support {}, min confidence {}, min lift {}",
        cfg.thresholds.min_support, cfg.thresholds.min_confidence, cfg.thresholds.min_lift
    );
    println!(
        "{} frequent itemsets, {} candidate rules, {} rules kept",
        analysis.frequent.len(),
        analysis.candidate_rules,
        analysis.rules.len()
    );

    let rows = report::rows(&analysis.rules, cfg.language);
    if analysis.no_rules_found() {
        let message = report::no_rules_message(analysis.candidate_rules, cfg.language);
        println!("\n{message}");
    } else {
        println!("\n{:>4}  {:>9}  {:>10}  {:>7}  Rule", "#", "support", "confidence", "lift");
        for (i, row) in rows.iter().enumerate() {
            println!(
                "{:>4}  {:>9.4}  {:>10.4}  {:>7.4}  {}",
                i + 1,
                row.support,
                row.confidence,
                row.lift,
                row.rule
            );
        }
    }

    if let Some(path) = &args.chart {
        if summary.borrows_per_category.is_empty() {
            warn!("no borrowing records in the selection; chart not written");
        } else {
            render_borrow_chart(&summary, path, cfg.language)
                .with_context(|| format!("failed to write chart {}", path.display()))?;
            println!("Borrowing chart saved to: {}", path.display());
        }
    }
    if let Some(path) = &args.html {
        std::fs::write(path, report::render_html(&rows, cfg.language))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\nHTML report saved to: {}", path.display());
    }
    if let Some(path) = &args.json {
        std::fs::write(path, report::render_json(&analysis.rules)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Rules saved to: {}", path.display());
    }

    info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "done");
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
