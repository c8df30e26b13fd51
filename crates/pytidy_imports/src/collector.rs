use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::PY_EXTENSIONS;

/// Collect the Python files to tidy. Explicit paths win: files are taken
/// as-is, directories are walked. With no paths, the whole root is walked.
/// Ignore rules (.gitignore and friends) apply to every walk.
pub fn collect_files(cfg: &Config, root: &Path) -> Result<Vec<PathBuf>> {
    debug!("Collecting Python files");
    let mut files: Vec<PathBuf> = Vec::new();

    if cfg.paths.is_empty() {
        walk_into(root, &mut files)?;
    } else {
        for path in &cfg.paths {
            if path.is_dir() {
                walk_into(path, &mut files)?;
            } else if is_python_file(path) {
                files.push(path.clone());
            } else {
                trace!("Skipping non-Python path: {}", path.display());
            }
        }
    }

    // Deterministic order keeps reports and tests stable.
    files.sort();
    files.dedup();
    debug!("Collected {} Python files", files.len());
    Ok(files)
}

fn walk_into(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    debug!("Walking directory tree from: {}", dir.display());
    let walker = WalkBuilder::new(dir).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if p.is_file() && is_python_file(p) {
            trace!("Found Python file: {}", p.display());
            files.push(p.to_path_buf());
        }
    }
    Ok(())
}

fn is_python_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| PY_EXTENSIONS.contains(&ext))
}
