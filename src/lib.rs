//! Shelfmine: Apriori frequent-itemset mining and association rules over
//! library borrowing records.
//!
//! Records are grouped into transactions (one per borrow timestamp),
//! encoded into a presence matrix, mined level by level for frequent
//! category sets, and turned into ranked "if A then B" rules with
//! support, confidence and lift.

pub mod apriori;
pub mod association_rules;
pub mod bitset;
pub mod chart;
pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod ranking;
pub mod report;
pub mod summary;

#[cfg(feature = "python")]
mod python;

#[cfg(feature = "python")]
use mimalloc::MiMalloc;

#[cfg(feature = "python")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub use apriori::{mine_frequent_itemsets, FrequentItemset, FrequentItemsets};
pub use association_rules::{generate_rules, Rule};
pub use chart::render_borrow_chart;
pub use cli::Args;
pub use config::{MiningConfig, Thresholds};
pub use encoder::{encode, encode_baskets, EncodedMatrix, Item, Transaction};
pub use error::{IngestError, MiningError, Result};
pub use ingest::{group_transactions, load_records, BorrowRecord, PeriodFilter};
pub use pipeline::{analyze, mine_and_derive_rules, Analysis};
pub use ranking::{filter_and_rank, filter_rules, rank_rules, RuleFilter};
pub use report::Language;
pub use summary::DatasetSummary;
