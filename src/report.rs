//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Text: fixed-width banner, finding list, and summary block
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::findings::{Finding, ScanResults, Severity};

const BANNER_WIDTH: usize = 60;

/// Findings in report order: ascending by (severity label, file, line).
///
/// The label text is the sort key, so the order is HIGH < LOW < MEDIUM.
pub fn sorted_findings(results: &ScanResults) -> Vec<&Finding> {
    let mut findings: Vec<&Finding> = results.findings.iter().collect();
    findings.sort_by(|a, b| {
        (a.severity.as_str(), &a.file, a.line).cmp(&(b.severity.as_str(), &b.file, b.line))
    });
    findings
}

/// Write the text report to stdout.
pub fn write_text(results: &ScanResults) {
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("  Security Scan Results");
    println!("{}", "=".repeat(BANNER_WIDTH));

    if results.findings.is_empty() {
        println!("\n  No findings. All clear!\n");
        return;
    }

    for finding in sorted_findings(results) {
        println!(
            "  [{}] {}:{} - {}",
            severity_tag(finding.severity),
            finding.file,
            finding.line,
            finding.description
        );
    }

    let summary = results.summary();
    println!("\n{}", "-".repeat(BANNER_WIDTH));
    println!("  Summary");
    println!("{}", "-".repeat(BANNER_WIDTH));
    println!("  HIGH:   {}", summary.high);
    println!("  MEDIUM: {}", summary.medium);
    println!("  LOW:    {}", summary.low);
    println!("  TOTAL:  {}", summary.total());
    println!("{}", "-".repeat(BANNER_WIDTH));
}

fn severity_tag(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => severity.as_str().red(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Low => severity.as_str().blue(),
    }
}

/// JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub findings: Vec<Finding>,
    pub summary: JsonSummary,
}

/// Per-severity counts plus the total.
#[derive(Serialize, Deserialize)]
pub struct JsonSummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

/// Write the JSON report to stdout. Findings keep the text report's order.
pub fn write_json(path: &str, results: &ScanResults) -> anyhow::Result<()> {
    let summary = results.summary();
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        files_scanned: results.scanned,
        findings: sorted_findings(results).into_iter().cloned().collect(),
        summary: JsonSummary {
            high: summary.high,
            medium: summary.medium,
            low: summary.low,
            total: summary.total(),
        },
    };

    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}
