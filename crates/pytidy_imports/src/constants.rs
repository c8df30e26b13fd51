//! File extension handling for Python sources.
//!
//! Centralized so collection and reporting agree on what counts as a
//! Python file.
//!
//! - `.py`: regular modules and scripts
//! - `.pyi`: stub files; their import blocks are tidied the same way

/// File extensions for Python files that should be tidied
pub const PY_EXTENSIONS: &[&str] = &[
    "py",  // modules and scripts
    "pyi", // typing stubs
];
