use std::{
    env,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::debug;

use crate::runner::RunResult;

/// Relativize a path to the current working directory for clickable links
fn display_path(path: &Path) -> String {
    match env::current_dir() {
        Ok(cwd) => path.strip_prefix(&cwd).unwrap_or(path).display().to_string(),
        Err(_) => {
            debug!("Failed to get current directory");
            path.display().to_string()
        }
    }
}

pub fn print_all_tidy<W: Write>(writer: &mut W, result: &RunResult) -> io::Result<()> {
    debug!("No changes needed");
    writeln!(
        writer,
        "{} All imports tidy across {} files.",
        "✓".green().bold(),
        result.files_seen.to_string().cyan()
    )?;
    writer.flush()?;
    Ok(())
}

pub fn print_changed<W: Write>(writer: &mut W, result: &RunResult, check: bool) -> io::Result<()> {
    debug!("Printing {} changed files", result.changed.len());
    let heading = if check {
        format!("{} file(s) need tidying", result.changed.len())
    } else {
        format!("Tidied {} file(s)", result.changed.len())
    };
    writeln!(writer, "{} {}\n", "⚠".yellow().bold(), heading.bold())?;

    for (idx, path) in result.changed.iter().enumerate() {
        let is_last = idx == result.changed.len() - 1;
        let prefix = if is_last { "└──" } else { "├──" };
        writeln!(writer, "{}  {}", prefix.dimmed(), display_path(path).blue())?;
    }

    writeln!(writer, "\n{}", "─".repeat(60).dimmed())?;
    writeln!(
        writer,
        "{} {} of {} files {}",
        "Summary:".bold(),
        result.changed.len().to_string().yellow().bold(),
        result.files_seen,
        if check { "would change" } else { "rewritten" }
    )?;

    writer.flush()?;
    Ok(())
}
