//! Core algorithms for tidying Python import blocks.
//!
//! This crate provides the buffer-level building blocks shared by the
//! pytidy tools:
//! - Parsing single import lines into normalized statements
//! - Locating the contiguous import block at the top of a buffer
//! - Regrouping and sorting the block by configurable rule patterns
//! - Stripping imports a linter flagged as unused, offsets kept stable
//!
//! Everything operates on an in-memory [`TextBuffer`]; file and editor
//! integration lives in the tool crates.

mod buffer;
mod diagnostics;
mod grouping;
mod locator;
mod parser;
mod strip;
mod tidy;
mod types;

// Re-export public API
pub use buffer::TextBuffer;
pub use diagnostics::{Diagnostic, DiagnosticsByLine, unused_import_name};
pub use grouping::{DEFAULT_GROUP_PATTERNS, GroupRules, render};
pub use locator::locate;
pub use parser::parse_import_line;
pub use strip::unused_removal_edits;
pub use tidy::{prettify, remove_unused, remove_unused_then_prettify};
pub use types::{ImportBlock, ImportKind, ParsedImport, Span};
