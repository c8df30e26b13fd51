use log::{debug, trace};

use crate::buffer::TextBuffer;
use crate::parser::parse_import_line;
use crate::types::{ImportBlock, ImportKind, Span};

/// Scan from the top of the buffer for the contiguous import block.
///
/// Import lines contribute parsed entries; blank and comment-only lines are
/// tolerated inside the block and extend it without contributing anything.
/// The first line that is none of these stops the scan. Returns `None` when
/// no import line exists, which callers treat as a no-op.
pub fn locate(buf: &TextBuffer) -> Option<ImportBlock> {
    let spans = buf.line_spans();
    let mut first: Option<usize> = None;
    let mut last = 0;
    let mut modules = Vec::new();
    let mut packages = Vec::new();

    for (idx, &span) in spans.iter().enumerate() {
        let line = buf.slice(span);
        let entries = parse_import_line(line);
        if !entries.is_empty() {
            if first.is_none() {
                first = Some(idx);
            }
            last = idx;
            for entry in entries {
                match entry.kind {
                    ImportKind::Module => modules.push(entry),
                    ImportKind::Package => packages.push(entry),
                }
            }
        } else if is_blank_or_comment(line) {
            last = idx;
        } else {
            trace!("import scan stopped at line {}", idx + 1);
            break;
        }
    }

    let first = first?;
    let span = Span::new(spans[first].start, spans[last].end);
    debug!(
        "import block spans lines {}..={} ({} module, {} package entries)",
        first + 1,
        last + 1,
        modules.len(),
        packages.len()
    );
    Some(ImportBlock { span, modules, packages })
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_at_top() {
        let buf = TextBuffer::new("import os\nfrom x import y\n\ndef main():\n    pass\n");
        let block = locate(&buf).unwrap();
        assert_eq!(block.modules.len(), 1);
        assert_eq!(block.packages.len(), 1);
        assert_eq!(block.span.start, 0);
    }

    #[test]
    fn test_no_imports_found() {
        let buf = TextBuffer::new("def main():\n    import os\n");
        assert!(locate(&buf).is_none());
    }

    #[test]
    fn test_empty_buffer() {
        assert!(locate(&TextBuffer::new("")).is_none());
    }

    #[test]
    fn test_tolerates_blank_and_comment_lines() {
        let src = "#!/usr/bin/env python\nimport os\n\n# legacy\nimport re\nx = 1\n";
        let buf = TextBuffer::new(src);
        let block = locate(&buf).unwrap();
        assert_eq!(block.modules.len(), 2);
        // Span starts at the first import, leaving the shebang untouched.
        assert_eq!(block.span.start, src.find("import os").unwrap());
        assert_eq!(block.span.end, src.find("import re").unwrap() + "import re".len());
    }

    #[test]
    fn test_stops_at_first_code_line() {
        let buf = TextBuffer::new("import os\nx = 1\nimport re\n");
        let block = locate(&buf).unwrap();
        assert_eq!(block.modules.len(), 1);
        assert_eq!(block.modules[0].statement, "import os");
    }

    #[test]
    fn test_trailing_blank_extends_span() {
        let src = "import os\n\nx = 1\n";
        let buf = TextBuffer::new(src);
        let block = locate(&buf).unwrap();
        // The blank line after the last import belongs to the block.
        assert_eq!(block.span.end, src.find("\nx = 1").unwrap());
    }

    #[test]
    fn test_commented_import_contributes_entry() {
        let buf = TextBuffer::new("# import os\nimport re\nx = 1\n");
        let block = locate(&buf).unwrap();
        assert_eq!(block.modules.len(), 2);
        assert!(block.modules[0].commented);
    }
}
