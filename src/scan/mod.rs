//! File routing and directory traversal.
//!
//! The dispatcher walks a directory tree and routes each file to the
//! scanners matching its extension: Python files get the structural
//! scanner plus the secret check, the JS/TS family gets the script
//! patterns plus the secret check, everything else is ignored.

mod lines;
mod python;

pub use lines::{scan_script_patterns, scan_secrets};
pub use python::scan_source as scan_python_source;

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::findings::ScanResults;

/// Extensions handled by the structural Python scanner.
const PYTHON_EXTENSIONS: &[&str] = &["py"];

/// Extensions handled by the line-oriented script scanner.
const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Scan every recognized file under `root`, recursively.
///
/// No single file can abort the walk: unreadable entries and files with
/// unrecognized extensions contribute nothing.
pub fn scan_directory(root: &Path, results: &mut ScanResults) {
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if entry.file_type().is_file() {
            scan_file(entry.path(), results);
        }
    }
}

/// Route one file to the scanners matching its extension.
pub fn scan_file(path: &Path, results: &mut ScanResults) {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let is_python = PYTHON_EXTENSIONS.contains(&ext);
    let is_script = SCRIPT_EXTENSIONS.contains(&ext);
    if !is_python && !is_script {
        return;
    }

    // Unreadable or non-UTF-8 files are skipped outright.
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return,
    };
    let file = path.to_string_lossy();

    if is_python {
        python::scan_source(&file, &source, results);
    } else {
        lines::scan_script_patterns(&file, &source, results);
    }
    lines::scan_secrets(&file, &source, results);

    results.scanned += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_python_file_routed_to_both_scanners() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("app.py");
        std::fs::write(&file_path, "eval(data)\nPASSWORD = \"hunter22\"\n").unwrap();

        let mut results = ScanResults::new();
        scan_file(&file_path, &mut results);

        assert_eq!(results.scanned, 1);
        assert_eq!(results.findings.len(), 2);
        assert!(results.findings.iter().any(|f| f.description.contains("eval")));
        assert!(results.findings.iter().any(|f| f.description.contains("secret")));
    }

    #[test]
    fn test_unrecognized_extension_ignored() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("notes.txt");
        std::fs::write(&file_path, "API_KEY = \"abcdefgh\"\n").unwrap();

        let mut results = ScanResults::new();
        scan_file(&file_path, &mut results);

        assert_eq!(results.scanned, 0);
        assert!(results.findings.is_empty());
    }

    #[test]
    fn test_non_utf8_file_skipped() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("binary.py");
        std::fs::write(&file_path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        let mut results = ScanResults::new();
        scan_file(&file_path, &mut results);

        assert_eq!(results.scanned, 0);
        assert!(results.findings.is_empty());
    }

    #[test]
    fn test_directory_walk_is_recursive() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("pkg").join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("deep.py"), "os.system(cmd)\n").unwrap();
        std::fs::write(temp.path().join("top.ts"), "el.href = 'javascript:x()';\n").unwrap();

        let mut results = ScanResults::new();
        scan_directory(temp.path(), &mut results);

        assert_eq!(results.scanned, 2);
        assert_eq!(results.findings.len(), 2);
    }
}
