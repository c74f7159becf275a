//! Command-line interface definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;

use crate::config::MiningConfig;
use crate::ingest::parse_month;
use crate::report::Language;

/// Find categories of books that are borrowed together
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON array of borrowing records (borrowed_at, category)
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only use records from this calendar year
    #[arg(long)]
    pub year: Option<i32>,

    /// Only use records from this month: a number or an English/Indonesian name
    #[arg(long)]
    pub month: Option<String>,

    /// Minimum support in [0, 1]
    #[arg(long)]
    pub min_support: Option<f64>,

    /// Minimum confidence in [0, 1]
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Minimum lift (1.0 keeps independent and positively associated rules)
    #[arg(long)]
    pub min_lift: Option<f64>,

    /// Largest itemset size to mine
    #[arg(long)]
    pub max_len: Option<usize>,

    /// Rule sentence language: en or id
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Write an HTML report to this path
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Write the ranked rules as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Write the per-category borrowing chart as SVG to this path
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Merge the optional config file with command-line overrides.
    pub fn resolve_config(&self) -> anyhow::Result<MiningConfig> {
        let mut cfg = match &self.config {
            Some(path) => MiningConfig::from_json_file(path)?,
            None => MiningConfig::default(),
        };

        if let Some(year) = self.year {
            cfg.period.year = Some(year);
        }
        if let Some(month) = &self.month {
            cfg.period.month = Some(parse_month(month)?);
        }
        let t = &mut cfg.thresholds;
        if let Some(v) = self.min_support {
            t.min_support = v;
        }
        if let Some(v) = self.min_confidence {
            t.min_confidence = v;
        }
        if let Some(v) = self.min_lift {
            t.min_lift = v;
        }
        if self.max_len.is_some() {
            t.max_len = self.max_len;
        }
        if let Some(lang) = self.language {
            cfg.language = lang;
        }

        cfg.thresholds.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("shelfmine").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let args = parse(&["--input", "records.json"]);
        let cfg = args.resolve_config().unwrap();
        assert_eq!(cfg, MiningConfig::default());
    }

    #[test]
    fn test_flag_overrides() {
        let args = parse(&[
            "-i",
            "records.json",
            "--year",
            "2023",
            "--month",
            "Maret",
            "--min-support",
            "0.05",
            "--min-confidence",
            "0.4",
            "--min-lift",
            "1.2",
            "--max-len",
            "3",
            "--language",
            "id",
        ]);
        let cfg = args.resolve_config().unwrap();
        assert_eq!(cfg.period.year, Some(2023));
        assert_eq!(cfg.period.month, Some(3));
        assert_eq!(cfg.thresholds.min_support, 0.05);
        assert_eq!(cfg.thresholds.min_confidence, 0.4);
        assert_eq!(cfg.thresholds.min_lift, 1.2);
        assert_eq!(cfg.thresholds.max_len, Some(3));
        assert_eq!(cfg.language, Language::Indonesian);
        assert!(args.chart.is_none());
    }

    #[test]
    fn test_output_paths() {
        let args = parse(&["-i", "r.json", "--chart", "borrows.svg", "--html", "out.html"]);
        assert_eq!(args.chart, Some(PathBuf::from("borrows.svg")));
        assert_eq!(args.html, Some(PathBuf::from("out.html")));
        assert!(args.json.is_none());
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(
            &path,
            r#"{"thresholds": {"min_support": 0.3, "min_confidence": 0.9}, "period": {"month": 5}}"#,
        )
        .unwrap();
        let path_str = path.to_str().unwrap();
        let args = parse(&["-i", "r.json", "-c", path_str, "--min-confidence", "0.5"]);
        let cfg = args.resolve_config().unwrap();
        assert_eq!(cfg.thresholds.min_support, 0.3);
        assert_eq!(cfg.thresholds.min_confidence, 0.5);
        assert_eq!(cfg.period.month, Some(5));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(parse(&["-i", "r.json", "--min-support", "2"]).resolve_config().is_err());
        assert!(parse(&["-i", "r.json", "--month", "Smarch"]).resolve_config().is_err());
        assert!(Args::try_parse_from(["shelfmine", "-i", "r.json", "--language", "fr"]).is_err());
    }
}
