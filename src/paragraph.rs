// WHY: explicit offset arithmetic over the buffer replaces any host editor's
// "move to next paragraph" primitive while keeping the same blank-line semantics

/// Byte range `[start, end)` into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Locate the next paragraph at or after byte offset `from`.
///
/// A paragraph boundary is any maximal run of blank (whitespace-only) lines;
/// boundary lines belong to neither neighbor and are never touched. The
/// returned span covers the paragraph's lines up to, but not including, the
/// final line's trailing newline. Returns `None` once only blank lines remain.
pub fn next_paragraph(text: &str, from: usize) -> Option<Span> {
    let mut pos = from.min(text.len());

    // Skip the boundary run, one blank line at a time.
    let start = loop {
        if pos >= text.len() {
            return None;
        }
        let (content_end, line_end) = line_extent(text, pos);
        if text[pos..content_end].trim().is_empty() {
            pos = line_end;
        } else {
            break pos;
        }
    };

    // Extend over consecutive non-blank lines.
    let mut end = start;
    while pos < text.len() {
        let (content_end, line_end) = line_extent(text, pos);
        if text[pos..content_end].trim().is_empty() {
            break;
        }
        end = content_end;
        pos = line_end;
    }

    Some(Span { start, end })
}

/// End of the line's content and start of the following line, from `pos`.
fn line_extent(text: &str, pos: usize) -> (usize, usize) {
    match text[pos..].find('\n') {
        Some(i) => (pos + i, pos + i + 1),
        None => (text.len(), text.len()),
    }
}

/// Lazy iterator over paragraph spans, restartable from any offset.
#[derive(Debug, Clone)]
pub struct Paragraphs<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Paragraphs<'a> {
    pub fn new(text: &'a str, start: usize) -> Self {
        Self { text, pos: start }
    }
}

impl Iterator for Paragraphs<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let span = next_paragraph(self.text, self.pos)?;
        self.pos = span.end;
        Some(span)
    }
}
