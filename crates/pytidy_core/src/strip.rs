use log::{trace, warn};
use regex::Regex;

use crate::buffer::TextBuffer;
use crate::diagnostics::{DiagnosticsByLine, unused_import_name};
use crate::parser::parse_import_line;
use crate::types::Span;

/// Compute the line rewrites that remove linter-flagged unused imports.
///
/// Edits are computed against the buffer snapshot and returned in
/// descending line order; applying them in that order keeps every
/// not-yet-applied span valid. A line whose remaining text falls out of
/// the import grammar is deleted outright, terminator included.
pub fn unused_removal_edits(buf: &TextBuffer, diagnostics: &DiagnosticsByLine) -> Vec<(Span, String)> {
    let spans = buf.line_spans();
    let mut edits = Vec::new();

    for (&line_idx, entries) in diagnostics.iter().rev() {
        let Some(&span) = spans.get(line_idx) else {
            // Stale report: the buffer is shorter than the diagnostics expect.
            warn!("diagnostic line {} out of range ({} lines), skipping", line_idx + 1, spans.len());
            continue;
        };

        let mut working = buf.slice(span).to_string();
        let mut touched = false;
        for diag in entries {
            let Some(name) = unused_import_name(&diag.message) else {
                continue;
            };
            let stripped = remove_name(&working, name);
            if stripped != working {
                trace!("removed unused import '{}' from line {}", name, line_idx + 1);
                working = stripped;
                touched = true;
            }
        }
        if !touched {
            continue;
        }

        if parse_import_line(&working).is_empty() {
            // Nothing importable left (`from x import`), drop the whole line.
            edits.push((buf.with_terminator(span), String::new()));
        } else {
            edits.push((span, working));
        }
    }
    edits
}

/// Remove one textual occurrence of `name` as an import target, keeping the
/// name list well formed. Aliased clauses are removed whole, whether the
/// reported name is the base name or the alias.
fn remove_name(line: &str, name: &str) -> String {
    let stripped = remove_literal(line, name);
    if stripped != line {
        return stripped;
    }
    // Linters commonly report a from-import as `<module>.<name>`; retry with
    // the leaf when the module part matches the line.
    if let Some((module, leaf)) = name.rsplit_once('.')
        && from_module_matches(line, module)
    {
        return remove_literal(line, leaf);
    }
    line.to_string()
}

fn remove_literal(line: &str, name: &str) -> String {
    let escaped = regex::escape(name);
    let patterns = [
        // Base name of an aliased clause: the alias goes with it.
        format!(r" ?\b{escaped}\b +as +[\w\-.]+"),
        // The alias was reported: the base name goes with it.
        format!(r" ?[\w\-.]+ +as +\b{escaped}\b"),
        // Leading or middle name: consume the trailing comma.
        format!(r"\b{escaped}\b *, *"),
        // Last or only name: consume the preceding comma.
        format!(r",? *\b{escaped}\b"),
    ];
    for pattern in patterns {
        let Ok(re) = Regex::new(&pattern) else { continue };
        if re.is_match(line) {
            return re.replacen(line, 1, "").into_owned();
        }
    }
    line.to_string()
}

fn from_module_matches(line: &str, module: &str) -> bool {
    let pattern = format!(r"^\s*#*\s*from +{} +import\b", regex::escape(module));
    Regex::new(&pattern).map(|re| re.is_match(line)).unwrap_or(false)
}
