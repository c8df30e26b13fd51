use anyhow::{Context, Result};
use regex::Regex;

use crate::types::ImportBlock;

/// Default grouping patterns, tuned for Zope/Plone codebases. Pure policy;
/// callers inject their own list to regroup for a different stack.
pub const DEFAULT_GROUP_PATTERNS: &[&str] = &[
    r"zope|five|Acquisition|AccessControl|z3c\.",
    r"plone|Products\.CMFCore|Products\.CMFPlone",
];

/// An ordered list of bucket patterns. The first pattern that matches a
/// statement wins; declaration order is the tie-break, never specificity.
#[derive(Debug, Clone)]
pub struct GroupRules {
    rules: Vec<Regex>,
}

impl GroupRules {
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref())
                    .with_context(|| format!("Invalid group pattern '{}'", p.as_ref()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(GroupRules { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the first rule matching `text`, in declaration order.
    pub fn first_match(&self, text: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.is_match(text))
    }
}

impl Default for GroupRules {
    fn default() -> Self {
        GroupRules::from_patterns(DEFAULT_GROUP_PATTERNS).expect("default group patterns compile")
    }
}

/// Serialize an import block back to text: one bucket per rule in rule
/// order, then the unmatched package imports, then the plain module
/// imports. Buckets are sorted internally, separated by a single blank
/// line, and the whole result is wrapped in one leading and one trailing
/// newline so it drops into the located block span.
pub fn render(block: &ImportBlock, rules: &GroupRules) -> String {
    let remaining = rules.len();
    let single = rules.len() + 1;
    let mut buckets: Vec<Vec<String>> = vec![Vec::new(); rules.len() + 2];

    for entry in &block.packages {
        let text = entry.rendered();
        let slot = rules.first_match(&text).unwrap_or(remaining);
        buckets[slot].push(text);
    }
    for entry in &block.modules {
        buckets[single].push(entry.rendered());
    }

    let mut sections = Vec::new();
    for bucket in &mut buckets {
        if bucket.is_empty() {
            continue;
        }
        bucket.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
        sections.push(bucket.join("\n"));
    }

    format!("\n{}\n", sections.join("\n\n"))
}

// Comments sort alongside their uncommented equivalents: compare with the
// leading marker and spaces stripped, content only.
fn sort_key(rendered: &str) -> &str {
    rendered.trim_start_matches('#').trim_start_matches(' ')
}
