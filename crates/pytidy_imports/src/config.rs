use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, trace};
use pytidy_core::GroupRules;
use serde::Deserialize;
use std::{env, fs, path::{Path, PathBuf}};

#[derive(Debug, Clone, Parser)]
#[command(name = "imports")]
#[command(about = "Tidy the import blocks of Python source files")]
pub struct Config {
    /// Files or directories to tidy (defaults to all Python files under the root)
    pub paths: Vec<PathBuf>,

    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Linter report with `path:line:col: message` lines, consulted for unused-import removal
    #[arg(long)]
    pub diagnostics: Option<PathBuf>,

    /// Grouping rules file (defaults to pytidy.json at the root, when present)
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Report files that would change without rewriting them
    #[arg(long)]
    pub check: bool,
}

pub(crate) fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;
    trace!("Starting search from: {:?}", current_dir);

    loop {
        let git_dir = current_dir.join(".git");
        trace!("Checking for .git at: {:?}", git_dir);
        if git_dir.exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                debug!("Could not find .git directory in any parent folder");
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    groups: Vec<String>,
}

/// Load the grouping rules: an explicit `--rules` file, else `pytidy.json`
/// at the root, else the built-in defaults. Bad patterns fail here, at
/// startup, rather than mid-run.
pub fn load_group_rules(root: &Path, explicit: Option<&Path>) -> Result<GroupRules> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let candidate = root.join("pytidy.json");
            candidate.exists().then_some(candidate)
        }
    };
    let Some(path) = path else {
        debug!("No rules file, using default group patterns");
        return Ok(GroupRules::default());
    };

    debug!("Reading group rules from {}", path.display());
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read rules file {}", path.display()))?;
    let parsed: RulesFile = serde_json::from_str(&content)
        .with_context(|| format!("Invalid rules file {}", path.display()))?;
    trace!("Loaded {} group patterns", parsed.groups.len());
    GroupRules::from_patterns(&parsed.groups)
        .with_context(|| format!("Invalid group pattern in {}", path.display()))
}
