//! Line-oriented pattern scanners.
//!
//! These checks need no parse tree: each physical line is matched against
//! pre-compiled patterns. The secret check runs on every scanned file;
//! the script-injection patterns only on the JS/TS family.

use lazy_static::lazy_static;
use regex::Regex;

use crate::findings::{ScanResults, Severity};

lazy_static! {
    /// Assignment of a quoted literal (4+ chars) to a credential-like name.
    static ref HARDCODED_SECRET: Regex = Regex::new(
        r#"(?i)(?:API_KEY|SECRET|PASSWORD|TOKEN|PRIVATE_KEY)\s*=\s*["'][^"']{4,}["']"#
    )
    .unwrap();

    /// Injection-prone idioms in JS/TS sources, checked per line in order.
    static ref SCRIPT_PATTERNS: Vec<(Regex, Severity, &'static str)> = vec![
        (
            Regex::new(r"dangerouslySetInnerHTML").unwrap(),
            Severity::Medium,
            "dangerouslySetInnerHTML can lead to XSS",
        ),
        (
            Regex::new(r"javascript\s*:").unwrap(),
            Severity::High,
            "javascript: URL is an XSS vector",
        ),
    ];
}

/// Flag lines that look like hardcoded credentials.
pub fn scan_secrets(file: &str, source: &str, results: &mut ScanResults) {
    for (idx, line) in source.lines().enumerate() {
        if HARDCODED_SECRET.is_match(line) {
            results.add(
                file,
                idx + 1,
                Severity::Medium,
                "Possible hardcoded secret detected",
            );
        }
    }
}

/// Flag injection-prone idioms in JS/TS sources.
///
/// A single line can match several patterns; each match is reported
/// independently at that line.
pub fn scan_script_patterns(file: &str, source: &str, results: &mut ScanResults) {
    for (idx, line) in source.lines().enumerate() {
        for (pattern, severity, description) in SCRIPT_PATTERNS.iter() {
            if pattern.is_match(line) {
                results.add(file, idx + 1, *severity, *description);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets(source: &str) -> ScanResults {
        let mut results = ScanResults::new();
        scan_secrets("test.py", source, &mut results);
        results
    }

    fn script(source: &str) -> ScanResults {
        let mut results = ScanResults::new();
        scan_script_patterns("test.ts", source, &mut results);
        results
    }

    #[test]
    fn secret_assignment_flagged() {
        let results = secrets("API_KEY = \"abcd1234\"\n");

        assert_eq!(results.findings.len(), 1);
        assert_eq!(results.findings[0].line, 1);
        assert_eq!(results.findings[0].severity, Severity::Medium);
        assert_eq!(
            results.findings[0].description,
            "Possible hardcoded secret detected"
        );
    }

    #[test]
    fn secret_below_minimum_length_ignored() {
        let results = secrets("API_KEY = \"ab\"\n");
        assert!(results.findings.is_empty());
    }

    #[test]
    fn secret_names_case_insensitive() {
        let source = "password = 'hunter22'\ndb_secret = 'letmein99'\nauth_token='abcdef'\n";
        let results = secrets(source);

        assert_eq!(results.findings.len(), 3);
        assert_eq!(
            results.findings.iter().map(|f| f.line).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn secret_without_quoted_value_ignored() {
        let results = secrets("PASSWORD = os.environ[\"DB\"]\nTOKEN = load_token()\n");
        assert!(results.findings.is_empty());
    }

    #[test]
    fn script_patterns_reported_per_line() {
        let source = "const a = 1;\nel.innerHTML = render();\nel.setAttribute('href', 'javascript:alert(1)');\n";
        let results = script(source);

        assert_eq!(results.findings.len(), 1);
        assert_eq!(results.findings[0].line, 3);
        assert_eq!(results.findings[0].severity, Severity::High);
    }

    #[test]
    fn script_patterns_same_line() {
        let source = "<a href=\"javascript:run()\" dangerouslySetInnerHTML={{__html: x}} />\n";
        let results = script(source);

        assert_eq!(results.findings.len(), 2);
        // Table order: dangerouslySetInnerHTML first, then javascript:.
        assert_eq!(results.findings[0].severity, Severity::Medium);
        assert_eq!(results.findings[1].severity, Severity::High);
        assert!(results.findings.iter().all(|f| f.line == 1));
    }

    #[test]
    fn javascript_scheme_is_case_sensitive() {
        let results = script("const url = 'JAVASCRIPT:alert(1)';\n");
        assert!(results.findings.is_empty());
    }

    #[test]
    fn javascript_scheme_allows_space_before_colon() {
        let results = script("const url = 'javascript :alert(1)';\n");
        assert_eq!(results.findings.len(), 1);
    }
}
