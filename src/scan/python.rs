//! Structural scanner for Python sources.
//!
//! Parses a file with tree-sitter and inspects every call expression for
//! known dangerous shapes: calls from the static table, process spawns
//! with `shell=True`, and SQL `text()` built from an f-string.

use lazy_static::lazy_static;
use phf::phf_map;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, Tree};

use crate::findings::{ScanResults, Severity};

/// Dotted callable names that are dangerous regardless of arguments.
static DANGEROUS_CALLS: phf::Map<&'static str, (Severity, &'static str)> = phf_map! {
    "eval" => (Severity::High, "Use of eval() can execute arbitrary code"),
    "exec" => (Severity::High, "Use of exec() can execute arbitrary code"),
    "os.system" => (Severity::High, "os.system() is vulnerable to shell injection"),
    "pickle.loads" => (Severity::High, "pickle.loads() can deserialize malicious objects"),
    "pickle.load" => (Severity::High, "pickle.load() can deserialize malicious objects"),
};

/// Process-spawning calls checked for `shell=True`.
const SUBPROCESS_CALLS: &[&str] = &["subprocess.call", "subprocess.run", "subprocess.Popen"];

lazy_static! {
    static ref PY_LANGUAGE: Language = tree_sitter_python::LANGUAGE.into();

    /// Matches every call expression at any nesting depth.
    static ref CALL_QUERY: Query = Query::new(&PY_LANGUAGE, "(call) @call").unwrap();
}

/// Run the structural checks on one Python file.
///
/// A source that does not parse cleanly (the tree carries ERROR nodes)
/// is skipped entirely; the line-oriented checks are unaffected.
pub fn scan_source(file: &str, source: &str, results: &mut ScanResults) {
    let tree = match parse(source) {
        Some(t) if !t.root_node().has_error() => t,
        _ => return,
    };

    let bytes = source.as_bytes();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&CALL_QUERY, tree.root_node(), bytes);

    while let Some(m) = matches.next() {
        for capture in m.captures {
            check_call(file, capture.node, bytes, results);
        }
    }
}

fn parse(source: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(&PY_LANGUAGE).ok()?;
    parser.parse(source, None)
}

/// Apply every call rule to one `call` node.
///
/// Rules are independent; a single call can produce more than one finding.
fn check_call(file: &str, call: Node, source: &[u8], results: &mut ScanResults) {
    let callee = match call.child_by_field_name("function") {
        Some(n) => n,
        None => return,
    };
    let name = match resolve_dotted_name(callee, source) {
        Some(n) => n,
        None => return,
    };
    let line = call.start_position().row + 1;

    if let Some(&(severity, description)) = DANGEROUS_CALLS.get(name.as_str()) {
        results.add(file, line, severity, description);
    }

    if SUBPROCESS_CALLS.contains(&name.as_str()) && has_shell_true(call, source) {
        results.add(
            file,
            line,
            Severity::High,
            format!("{}() called with shell=True -- risk of shell injection", name),
        );
    }

    if (name == "text" || name == "sqlalchemy.text") && first_arg_is_fstring(call) {
        results.add(
            file,
            line,
            Severity::High,
            "SQL text() with f-string -- use bind parameters instead",
        );
    }
}

/// Resolve a callee expression to its dotted name (`eval`, `os.system`,
/// `a.b.c`).
///
/// Attribute chains are walked down to their root; a root that is not a
/// plain identifier (a call result, a subscript) yields no name.
fn resolve_dotted_name(node: Node, source: &[u8]) -> Option<String> {
    match node.kind() {
        "identifier" => node.utf8_text(source).ok().map(str::to_string),
        "attribute" => {
            let mut parts = Vec::new();
            let mut current = node;
            while current.kind() == "attribute" {
                let attr = current.child_by_field_name("attribute")?;
                parts.push(attr.utf8_text(source).ok()?);
                current = current.child_by_field_name("object")?;
            }
            if current.kind() != "identifier" {
                return None;
            }
            parts.push(current.utf8_text(source).ok()?);
            parts.reverse();
            Some(parts.join("."))
        }
        _ => None,
    }
}

/// True when the call passes a `shell` keyword argument whose value is the
/// literal `True`. Variables and other expressions never count.
fn has_shell_true(call: Node, source: &[u8]) -> bool {
    let args = match call.child_by_field_name("arguments") {
        Some(a) => a,
        None => return false,
    };

    let mut cursor = args.walk();
    for child in args.named_children(&mut cursor) {
        if child.kind() != "keyword_argument" {
            continue;
        }
        let is_shell = child
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
            .map(|n| n == "shell")
            .unwrap_or(false);
        if is_shell {
            return child
                .child_by_field_name("value")
                .map(|v| v.kind() == "true")
                .unwrap_or(false);
        }
    }
    false
}

/// True when the first positional argument is an f-string.
fn first_arg_is_fstring(call: Node) -> bool {
    let args = match call.child_by_field_name("arguments") {
        Some(a) => a,
        None => return false,
    };

    let mut cursor = args.walk();
    let result = args
        .named_children(&mut cursor)
        .find(|c| c.kind() != "keyword_argument" && c.kind() != "comment")
        .map(|first| is_fstring(first))
        .unwrap_or(false);
    result
}

/// An f-string parses as a `string` node with `interpolation` children;
/// plain strings have none.
fn is_fstring(node: Node) -> bool {
    if node.kind() != "string" {
        return false;
    }
    let mut cursor = node.walk();
    let result = node
        .named_children(&mut cursor)
        .any(|c| c.kind() == "interpolation");
    result
}
