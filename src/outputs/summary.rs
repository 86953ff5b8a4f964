//! End-of-run console summary.

use crate::models::AggregateReport;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Render the summary block printed after a run.
pub fn render(report: &AggregateReport, auth_required: usize, output: &str) -> String {
    let meta = &report.metadata;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    writeln!(out, "{rule}").unwrap();
    writeln!(
        out,
        "COMPLETE: {} cameras from {} sources",
        group_thousands(meta.total_cameras),
        meta.sources_processed
    )
    .unwrap();
    writeln!(out, "FAILED: {} sources", meta.sources_failed).unwrap();
    writeln!(out, "REQUIRES AUTH: {auth_required} sources (not fetched)").unwrap();
    writeln!(out, "Output: {output}").unwrap();
    writeln!(out, "{rule}").unwrap();

    if !meta.failed_sources.is_empty() {
        writeln!(out, "\nFailed sources:").unwrap();
        for name in &meta.failed_sources {
            writeln!(out, "  - {name}").unwrap();
        }
    }
    out
}

/// `23456` → `"23,456"`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
