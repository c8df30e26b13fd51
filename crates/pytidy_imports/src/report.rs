use anyhow::{Context, Result};
use dashmap::DashMap;
use log::{debug, trace, warn};
use pytidy_core::{Diagnostic, DiagnosticsByLine};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Read-only diagnostic store keyed by buffer identity (the file path).
/// Loaded once per invocation; workers snapshot their file's entries and
/// never write back.
pub type DiagnosticStore = DashMap<PathBuf, DiagnosticsByLine>;

// `path:line:col: message` with the column optional (pyflakes omits it in
// older releases). Line and column are 1-based in this format.
static REPORT_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?):(\d+)(?::(\d+))?:\s*(.+)$").unwrap());

/// Parse a flake8/pyflakes-style report file into a per-file store.
/// Unparseable lines are skipped; the report may mix message kinds, the
/// core only acts on the unused-import ones.
pub fn load_report(path: &Path) -> Result<DiagnosticStore> {
    debug!("Loading diagnostics report from {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read diagnostics report {}", path.display()))?;

    let store = DiagnosticStore::new();
    let mut total = 0usize;
    for raw in content.lines() {
        let Some(caps) = REPORT_LINE_RE.captures(raw) else {
            trace!("Skipping unparseable report line: {}", raw);
            continue;
        };
        let Ok(line_1based) = caps[2].parse::<usize>() else {
            warn!("Bad line number in report line: {}", raw);
            continue;
        };
        let Some(line) = line_1based.checked_sub(1) else {
            warn!("Report line numbers are 1-based, got 0: {}", raw);
            continue;
        };
        let col = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let message = caps[4].to_string();

        let file = canonical_key(Path::new(&caps[1]));
        trace!("Diagnostic for {} line {}: {}", file.display(), line + 1, message);
        store
            .entry(file)
            .or_default()
            .entry(line)
            .or_default()
            .push(Diagnostic { line, col, message });
        total += 1;
    }

    debug!("Loaded {} diagnostics for {} files", total, store.len());
    Ok(store)
}

/// Normalize a path for store lookup, so relative report paths and
/// absolute walked paths land on the same key.
pub fn canonical_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parses_flake8_format() {
        let temp_dir = TempDir::new().unwrap();
        let app = temp_dir.path().join("app.py");
        fs::write(&app, "import os\n").unwrap();
        let report = temp_dir.path().join("report.txt");
        fs::write(
            &report,
            format!(
                "{}:1:1: F401 'os' imported but unused\n{}:3:1: E302 expected 2 blank lines\n",
                app.display(),
                app.display()
            ),
        )
        .unwrap();

        let store = load_report(&report).unwrap();
        let key = canonical_key(&app);
        let by_line = store.get(&key).unwrap();
        // 1-based report lines become 0-based buffer lines.
        assert_eq!(by_line.get(&0).unwrap().len(), 1);
        assert_eq!(by_line.get(&2).unwrap()[0].message, "E302 expected 2 blank lines");
    }

    #[test]
    fn test_parses_column_less_format() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("report.txt");
        fs::write(&report, "app.py:4: 'sys' imported but unused\n").unwrap();

        let store = load_report(&report).unwrap();
        let by_line = store.get(&canonical_key(Path::new("app.py"))).unwrap();
        let diag = &by_line.get(&3).unwrap()[0];
        assert_eq!(diag.col, 0);
        assert_eq!(diag.message, "'sys' imported but unused");
    }

    #[test]
    fn test_skips_noise_lines() {
        let temp_dir = TempDir::new().unwrap();
        let report = temp_dir.path().join("report.txt");
        fs::write(&report, "checking 12 files...\n\napp.py:1:1: F401 'os' imported but unused\n")
            .unwrap();

        let store = load_report(&report).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_report_is_an_error() {
        assert!(load_report(Path::new("/nonexistent/report.txt")).is_err());
    }
}
