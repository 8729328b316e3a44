//! Command-line interface for seccheck.

use clap::Parser;
use std::path::PathBuf;

use crate::findings::ScanResults;
use crate::report;
use crate::scan;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Lightweight security scanner for Python and JS/TS sources.
///
/// Scans a directory tree for dangerous call patterns in Python files,
/// injection-prone idioms in JS/TS files, and hardcoded secrets in both.
/// The process exits non-zero when any HIGH-severity finding is present.
#[derive(Parser)]
#[command(name = "seccheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    pub directory: PathBuf,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Run a scan and return the process exit code.
pub fn run_scan(cli: &Cli) -> anyhow::Result<i32> {
    if cli.format != "text" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'text' or 'json'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    if !cli.directory.is_dir() {
        eprintln!(
            "ERROR: {} is not a valid directory",
            cli.directory.display()
        );
        return Ok(EXIT_ERROR);
    }

    let mut results = ScanResults::new();
    scan::scan_directory(&cli.directory, &mut results);

    match cli.format.as_str() {
        "json" => report::write_json(&cli.directory.to_string_lossy(), &results)?,
        _ => report::write_text(&results),
    }

    if results.has_high() {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}
