use crate::types::Span;

/// In-memory text buffer addressable by absolute byte offset.
///
/// This is the only surface the tidy operations mutate: read the whole
/// text, enumerate line regions, replace a region. Host integration
/// (editors, files) sits outside and hands the text in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        TextBuffer { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Content span of every line, terminators excluded. A trailing
    /// newline does not produce an empty final line.
    pub fn line_spans(&self) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut start = 0;
        for (i, byte) in self.text.bytes().enumerate() {
            if byte == b'\n' {
                spans.push(Span::new(start, i));
                start = i + 1;
            }
        }
        if start < self.text.len() {
            spans.push(Span::new(start, self.text.len()));
        }
        spans
    }

    pub fn slice(&self, span: Span) -> &str {
        &self.text[span.start..span.end]
    }

    /// Extend a span past its trailing line terminator, when one follows.
    pub fn with_terminator(&self, span: Span) -> Span {
        if self.text.as_bytes().get(span.end) == Some(&b'\n') {
            Span::new(span.start, span.end + 1)
        } else {
            span
        }
    }

    pub fn replace(&mut self, span: Span, replacement: &str) {
        self.text.replace_range(span.start..span.end, replacement);
    }
}
