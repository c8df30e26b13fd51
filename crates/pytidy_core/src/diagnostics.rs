use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// One linter finding on a buffer line. `line` is a 0-based index into the
/// buffer's lines; external 1-based report formats convert at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

/// Diagnostics grouped by 0-based line index. Ordered so callers can walk
/// flagged lines back to front.
pub type DiagnosticsByLine = BTreeMap<usize, Vec<Diagnostic>>;

static UNUSED_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(.*?)' imported but unused").unwrap());

/// Extract the symbol name from an `'<name>' imported but unused` message.
/// Every other message shape is ignored by the stripper.
pub fn unused_import_name(message: &str) -> Option<&str> {
    UNUSED_IMPORT_RE.captures(message).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}
