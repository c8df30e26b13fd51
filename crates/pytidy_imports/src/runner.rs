use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use pytidy_core::{GroupRules, TextBuffer, prettify, remove_unused, remove_unused_then_prettify};
use rayon::prelude::*;
use std::{fs, path::{Path, PathBuf}};

use crate::{
    collector::collect_files,
    config::{Config, find_git_root, load_group_rules},
    report::{DiagnosticStore, canonical_key, load_report},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Regroup and sort the import block.
    Prettify,
    /// Strip imports the diagnostics report flags as unused.
    RemoveUnused,
    /// Remove unused imports, then regroup what remains.
    Fix,
}

#[derive(Debug, Clone)]
pub struct RunResult {
    /// Files whose buffer changed (or would change, in check mode).
    pub changed: Vec<PathBuf>,
    pub files_seen: usize,
}

pub fn run(mut cfg: Config, op: Operation) -> Result<RunResult> {
    info!("Starting import tidy run ({:?})", op);

    let root = if let Some(r) = cfg.root.take() {
        debug!("Using provided root directory: {:?}", r);
        r.canonicalize().unwrap_or(r)
    } else {
        debug!("No root provided, searching for git root");
        find_git_root()?
    };
    info!("Using root directory: {}", root.display());

    let rules = load_group_rules(&root, cfg.rules.as_deref())?;

    let store = match &cfg.diagnostics {
        Some(path) => load_report(path)?,
        None => DiagnosticStore::new(),
    };
    if store.is_empty() && matches!(op, Operation::RemoveUnused | Operation::Fix) {
        warn!("No diagnostics loaded; unused-import removal will be a no-op");
    }

    let files = collect_files(&cfg, &root)?;
    if files.is_empty() {
        warn!("No Python files found under {}", root.display());
        return Err(anyhow!("No Python files found under {}", root.display()));
    }
    info!("Processing {} files in parallel", files.len());

    let check = cfg.check;
    let changed: Vec<PathBuf> = files
        .par_iter()
        .filter_map(|file| match tidy_file(file, &rules, &store, op, check) {
            Ok(true) => Some(file.clone()),
            Ok(false) => None,
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                None
            }
        })
        .collect();

    info!("Tidy run complete. {} of {} files changed", changed.len(), files.len());
    Ok(RunResult { changed, files_seen: files.len() })
}

fn tidy_file(
    path: &Path,
    rules: &GroupRules,
    store: &DiagnosticStore,
    op: Operation,
    check: bool,
) -> Result<bool> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut buf = TextBuffer::new(src);

    // Snapshot this file's diagnostics before any mutation; line numbers in
    // the store refer to the buffer as the linter saw it.
    let diags = store.get(&canonical_key(path)).map(|entry| entry.clone()).unwrap_or_default();

    let changed = match op {
        Operation::Prettify => prettify(&mut buf, rules),
        Operation::RemoveUnused => remove_unused(&mut buf, &diags),
        Operation::Fix => remove_unused_then_prettify(&mut buf, &diags, rules),
    };

    if changed && !check {
        fs::write(path, buf.text())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Rewrote {}", path.display());
    }
    Ok(changed)
}
