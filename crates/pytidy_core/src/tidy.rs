use log::debug;

use crate::buffer::TextBuffer;
use crate::diagnostics::DiagnosticsByLine;
use crate::grouping::{GroupRules, render};
use crate::locator::locate;
use crate::strip::unused_removal_edits;

/// Regroup and sort the buffer's import block in place.
///
/// Returns whether the buffer changed. A buffer without an import block is
/// left untouched.
pub fn prettify(buf: &mut TextBuffer, rules: &GroupRules) -> bool {
    let Some(block) = locate(buf) else {
        debug!("no import block found, skipping prettify");
        return false;
    };
    let rendered = render(&block, rules);
    // The render is newline-wrapped; at the seam the block already sits
    // after a terminator (or at offset 0), so the leading wrap is dropped
    // and the region extends through the block's final terminator. Splicing
    // the wrap verbatim would grow a blank line on every run.
    let body = rendered.strip_prefix('\n').unwrap_or(&rendered);
    let region = buf.with_terminator(block.span);
    if buf.slice(region) == body {
        return false;
    }
    buf.replace(region, body);
    true
}

/// Strip linter-flagged unused imports in place, highest line first.
pub fn remove_unused(buf: &mut TextBuffer, diagnostics: &DiagnosticsByLine) -> bool {
    let edits = unused_removal_edits(buf, diagnostics);
    if edits.is_empty() {
        return false;
    }
    debug!("applying {} unused-import edits", edits.len());
    for (span, text) in &edits {
        buf.replace(*span, text);
    }
    true
}

/// Remove unused imports first, then regroup what remains, so the sorted
/// output never resurrects a stripped name.
pub fn remove_unused_then_prettify(
    buf: &mut TextBuffer,
    diagnostics: &DiagnosticsByLine,
    rules: &GroupRules,
) -> bool {
    let removed = remove_unused(buf, diagnostics);
    let prettified = prettify(buf, rules);
    removed || prettified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::parser::parse_import_line;
    use std::collections::BTreeMap;

    fn diags(entries: &[(usize, &str)]) -> DiagnosticsByLine {
        let mut map: DiagnosticsByLine = BTreeMap::new();
        for &(line, message) in entries {
            map.entry(line).or_default().push(Diagnostic {
                line,
                col: 0,
                message: message.to_string(),
            });
        }
        map
    }

    #[test]
    fn test_prettify_sorts_and_groups() {
        let src = "import sys\nfrom zope.interface import implementer\nimport os\n\ndef main():\n    pass\n";
        let mut buf = TextBuffer::new(src);
        assert!(prettify(&mut buf, &GroupRules::default()));
        assert_eq!(
            buf.text(),
            "from zope.interface import implementer\n\nimport os\nimport sys\ndef main():\n    pass\n"
        );
    }

    #[test]
    fn test_prettify_idempotent() {
        let src = "import sys\nfrom plone.api import portal, content\nimport os\n\nx = 1\n";
        let mut buf = TextBuffer::new(src);
        prettify(&mut buf, &GroupRules::default());
        let once = buf.text().to_string();
        assert!(!prettify(&mut buf, &GroupRules::default()));
        assert_eq!(buf.text(), once);
    }

    #[test]
    fn test_prettify_without_imports_is_noop() {
        let src = "def main():\n    pass\n";
        let mut buf = TextBuffer::new(src);
        assert!(!prettify(&mut buf, &GroupRules::default()));
        assert_eq!(buf.text(), src);
    }

    #[test]
    fn test_prettify_preserves_shebang_and_trailing_code() {
        let src = "#!/usr/bin/env python\nimport re\nimport os\nx = 1\n";
        let mut buf = TextBuffer::new(src);
        assert!(prettify(&mut buf, &GroupRules::default()));
        assert_eq!(buf.text(), "#!/usr/bin/env python\nimport os\nimport re\nx = 1\n");
    }

    #[test]
    fn test_prettify_preserves_symbol_set() {
        let src = "from zope.interface import implementer, Interface\nimport sys\nfrom foo import bar\nimport os\nx = 1\n";
        let mut buf = TextBuffer::new(src);

        let mut before: Vec<String> = src
            .lines()
            .flat_map(parse_import_line)
            .map(|e| e.statement)
            .collect();
        prettify(&mut buf, &GroupRules::default());
        let mut after: Vec<String> = buf
            .text()
            .lines()
            .flat_map(parse_import_line)
            .map(|e| e.statement)
            .collect();

        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_remove_unused_rewrites_flagged_line() {
        let src = "import os\nfrom plone.api import content, portal\nprint(os, portal)\n";
        let mut buf = TextBuffer::new(src);
        assert!(remove_unused(&mut buf, &diags(&[(1, "'content' imported but unused")])));
        assert_eq!(buf.text(), "import os\nfrom plone.api import portal\nprint(os, portal)\n");
    }

    #[test]
    fn test_remove_unused_deletes_whole_line() {
        let src = "import os\nimport sys\nprint(os)\n";
        let mut buf = TextBuffer::new(src);
        assert!(remove_unused(&mut buf, &diags(&[(1, "'sys' imported but unused")])));
        assert_eq!(buf.text(), "import os\nprint(os)\n");
    }

    #[test]
    fn test_remove_unused_multiple_lines_keeps_earlier_text_intact() {
        let src = "import a\nimport b\nimport c\nimport d\nprint(b, d)\n";
        let mut buf = TextBuffer::new(src);
        let removed = remove_unused(
            &mut buf,
            &diags(&[(0, "'a' imported but unused"), (2, "'c' imported but unused")]),
        );
        assert!(removed);
        assert_eq!(buf.text(), "import b\nimport d\nprint(b, d)\n");
    }

    #[test]
    fn test_remove_unused_without_matches_is_noop() {
        let src = "import os\n";
        let mut buf = TextBuffer::new(src);
        assert!(!remove_unused(&mut buf, &BTreeMap::new()));
        assert_eq!(buf.text(), src);
    }

    #[test]
    fn test_fix_removes_then_groups() {
        let src = "import sys\nfrom zope.interface import implementer, Interface\nimport os\nx = implementer\n";
        let mut buf = TextBuffer::new(src);
        let changed = remove_unused_then_prettify(
            &mut buf,
            &diags(&[
                (0, "'sys' imported but unused"),
                (1, "'Interface' imported but unused"),
            ]),
            &GroupRules::default(),
        );
        assert!(changed);
        assert_eq!(
            buf.text(),
            "from zope.interface import implementer\n\nimport os\nx = implementer\n"
        );
    }
}
