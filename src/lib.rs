//! Seccheck - lightweight security scanner for Python and JS/TS sources.
//!
//! Seccheck walks a directory tree and reports risky constructs: dangerous
//! call patterns in Python (resolved over a parsed syntax tree), script
//! injection idioms in JS/TS, and hardcoded secrets in both.
//!
//! # Architecture
//!
//! - `findings`: Finding/result types and severity aggregation
//! - `scan`: Extension routing, directory traversal, and the two scanner
//!   families (tree-sitter structural checks, per-line pattern checks)
//! - `report`: Output formatting (text, JSON) and report ordering
//! - `cli`: Argument parsing and exit-code mapping
//!
//! A scan is strictly sequential: walk, scan each file, then report once.
//! Per-file parse and read failures are skipped without aborting the run;
//! only HIGH-severity findings make the process exit non-zero.

pub mod cli;
pub mod findings;
pub mod report;
pub mod scan;

pub use findings::{Finding, ScanResults, Severity, SeverityCounts};
pub use report::{sorted_findings, JsonReport};
