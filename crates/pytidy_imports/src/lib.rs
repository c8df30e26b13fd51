//! Batch import tidying for Python projects.
//!
//! This crate wraps the `pytidy_core` buffer algorithms in a file-level
//! tool: collect the Python files under a root, load a linter's
//! diagnostics report, then prettify import blocks and strip unused
//! imports across all files in parallel.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use pytidy_imports::{Config, Operation, run};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     paths: vec![],
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     diagnostics: Some(std::path::PathBuf::from("flake8.txt")),
//!     rules: None,
//!     check: false,
//! };
//!
//! let result = run(cfg, Operation::Fix)?;
//! println!("{} files changed", result.changed.len());
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod constants;
mod report;
mod reporter;
mod runner;

// Re-export public API
pub use config::{Config, load_group_rules};
pub use report::{DiagnosticStore, load_report};
pub use reporter::{print_all_tidy, print_changed};
pub use runner::{Operation, RunResult, run};
