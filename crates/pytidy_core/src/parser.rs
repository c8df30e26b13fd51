use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ImportKind, ParsedImport};

// Module and symbol names: word characters, hyphen, dot.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+\s*").unwrap());
static FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^from +([\w\-.]+) +import +([\w\-., ]+?)(?: +as +([\w\-.]+))? *$").unwrap()
});
static PLAIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^import +([\w\-., ]+?) *$").unwrap());

/// Recognize a single line as zero or more import statements.
///
/// Returns one `Module` entry for an `import x` line, and one `Package` entry
/// per imported name for a `from x import ...` line. An `as` alias is only
/// honored when exactly one name is present. A leading `#`-run marks the
/// entries as commented; the marker itself is stripped. Any line outside the
/// grammar yields an empty vec.
pub fn parse_import_line(line: &str) -> Vec<ParsedImport> {
    let trimmed = line.trim_start();
    let (commented, rest) = match COMMENT_RE.find(trimmed) {
        Some(m) => (true, &trimmed[m.end()..]),
        None => (false, trimmed),
    };

    if let Some(caps) = FROM_RE.captures(rest) {
        let module = &caps[1];
        let names = collapse_names(&caps[2]);
        if names.is_empty() {
            return vec![];
        }
        let alias = caps.get(3).map(|m| m.as_str());

        let mut entries = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            // An alias only binds to the final name; single-name lines are
            // the only grammatically valid place for one.
            let statement = if let Some(alias) = alias
                && i == names.len() - 1
            {
                format!("from {} import {} as {}", module, name, alias)
            } else {
                format!("from {} import {}", module, name)
            };
            entries.push(ParsedImport { commented, statement, kind: ImportKind::Package });
        }
        entries
    } else if let Some(caps) = PLAIN_RE.captures(rest) {
        let names = collapse_names(&caps[1]);
        if names.is_empty() {
            return vec![];
        }
        let statement = format!("import {}", names.join(", "));
        vec![ParsedImport { commented, statement, kind: ImportKind::Module }]
    } else {
        vec![]
    }
}

// Split a name list on commas and collapse whitespace runs to single spaces.
fn collapse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|piece| piece.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|piece| !piece.is_empty())
        .collect()
}
