//! Human-readable rendering of ranked rules: sentences, table rows, an
//! HTML report and JSON.

use std::fmt::Write as _;
use std::str::FromStr;

use html_escape::encode_text;
use serde::{Deserialize, Serialize};

use crate::association_rules::Rule;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Indonesian,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "id" | "indonesian" | "indonesia" => Ok(Language::Indonesian),
            other => Err(format!("unsupported language {other:?} (expected en or id)")),
        }
    }
}

struct Strings {
    title: &'static str,
    rule_header: &'static str,
    if_prefix: &'static str,
    then_infix: &'static str,
    explanation: &'static [(&'static str, &'static str)],
}

static EN: Strings = Strings {
    title: "Apriori Analysis Results",
    rule_header: "Rules",
    if_prefix: "If borrowing",
    then_infix: "then likely to also borrow",
    explanation: &[
        (
            "Rules",
            "Patterns of books that are borrowed together in the same borrowing transaction.",
        ),
        (
            "Support",
            "How often a combination of book categories appears together across all borrowing transactions.",
        ),
        (
            "Confidence",
            "How likely the consequent categories are borrowed given the antecedent categories were borrowed.",
        ),
        (
            "Lift",
            "How much more often the categories are borrowed together than if they were independent; above 1 is a positive association.",
        ),
        (
            "Conclusion",
            "Categories linked by a rule are good candidates to be shelved close to each other.",
        ),
    ],
};

static ID: Strings = Strings {
    title: "Hasil Analisis Apriori",
    rule_header: "Rules",
    if_prefix: "Jika meminjam buku",
    then_infix: "maka cenderung meminjam buku",
    explanation: &[
        ("Rules", "Aturan-aturan pola peminjaman buku dalam transaksi peminjaman buku."),
        (
            "Support",
            "Ukuran seberapa sering pasangan buku muncul bersamaan dalam transaksi peminjaman buku.",
        ),
        (
            "Confidence",
            "Ukuran seberapa besar peluang bahwa suatu buku akan dipinjam bersamaan dalam transaksi peminjaman buku.",
        ),
        ("Lift", "Ukuran seberapa kuat kemungkinan buku dipinjam bersamaan oleh pengunjung."),
        (
            "Kesimpulan",
            "Kategori buku pada hasil rules sebaiknya didekatkan pada rak perpustakaan.",
        ),
    ],
};

impl Language {
    fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Indonesian => &ID,
        }
    }
}

/// One sentence per rule, e.g.
/// `If borrowing Fiksi, then likely to also borrow Sains.`
pub fn describe_rule(rule: &Rule, language: Language) -> String {
    let s = language.strings();
    format!(
        "{} {}, {} {}.",
        s.if_prefix,
        rule.antecedent.join(", "),
        s.then_infix,
        rule.consequent.join(", ")
    )
}

/// Message for a run that kept no rules. No candidate rules at all means
/// support pruning left nothing to split; otherwise the confidence and
/// lift floors removed every candidate.
pub fn no_rules_message(candidate_rules: usize, language: Language) -> &'static str {
    match (candidate_rules, language) {
        (0, Language::English) => {
            "No Apriori results: no category set is frequent enough to form a rule."
        }
        (0, Language::Indonesian) => "Tidak ada hasil Apriori.",
        (_, Language::English) => {
            "Candidate rules were found, but none reached the confidence and lift thresholds."
        }
        (_, Language::Indonesian) => {
            "Tidak ada rules yang memenuhi batas confidence dan lift. Coba turunkan nilai minimum."
        }
    }
}

/// A presentation row: the rule sentence and its three headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub rule: String,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

pub fn rows(rules: &[Rule], language: Language) -> Vec<ReportRow> {
    rules
        .iter()
        .map(|r| ReportRow {
            rule: describe_rule(r, language),
            support: r.support,
            confidence: r.confidence,
            lift: r.lift,
        })
        .collect()
}

const TABLE_STYLE: &str = "<style>
table { border-collapse: collapse; width: 100%; font-size: 14px; }
th, td { border: 1px solid #dddddd; text-align: left; padding: 8px; }
th { background-color: #f2f2f2; }
tr:nth-child(even) { background-color: #f2f2f2; }
</style>
";

/// Standalone HTML document: title, rule table and metric explanations.
pub fn render_html(rows: &[ReportRow], language: Language) -> String {
    let s = language.strings();
    let mut html = String::with_capacity(1024 + rows.len() * 160);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", s.title);
    html.push_str(TABLE_STYLE);
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", s.title);

    html.push_str("<table>\n<thead>\n");
    let _ = writeln!(
        html,
        "<tr><th>{}</th><th>support</th><th>confidence</th><th>lift</th></tr>",
        s.rule_header
    );
    html.push_str("</thead>\n<tbody>\n");
    for row in rows {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{:.6}</td><td>{:.6}</td><td>{:.6}</td></tr>",
            encode_text(&row.rule),
            row.support,
            row.confidence,
            row.lift
        );
    }
    html.push_str("</tbody>\n</table>\n");

    html.push_str("<h3>Keterangan / Notes:</h3>\n");
    for (term, text) in s.explanation {
        let _ = writeln!(html, "<p><strong>{}</strong><br>{}</p>", term.to_uppercase(), text);
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Full rule records, including leverage and conviction, as pretty JSON.
pub fn render_json(rules: &[Rule]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rules)
}
