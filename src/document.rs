// WHY: the engine needs only read access plus a ranged splice; funneling every
// edit through one checked method keeps paragraph joins atomic

use anyhow::{bail, Result};
use std::ops::Range;

/// Mutable text buffer the reflow engine operates on.
///
/// Owned by the caller and outlives any single reflow invocation. The engine
/// reads through `as_str` and writes through `replace_range`; there is no
/// other mutation path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read-only view of the full buffer.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Splice `replacement` over `range` (byte offsets).
    ///
    /// WHY: validates bounds and char boundaries up front instead of letting
    /// `String::replace_range` panic, so the orchestrator can contain a bad
    /// span as a reported fault rather than a crash.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> Result<()> {
        if range.start > range.end || range.end > self.text.len() {
            bail!(
                "replace range {}..{} out of bounds for document of {} bytes",
                range.start,
                range.end,
                self.text.len()
            );
        }
        if !self.text.is_char_boundary(range.start) || !self.text.is_char_boundary(range.end) {
            bail!(
                "replace range {}..{} does not fall on character boundaries",
                range.start,
                range.end
            );
        }
        self.text.replace_range(range, replacement);
        Ok(())
    }

    /// Consume the document, returning the buffer.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_range_splices_in_place() {
        let mut doc = Document::new("one two three");
        doc.replace_range(4..7, "2").unwrap();
        assert_eq!(doc.as_str(), "one 2 three");
    }

    #[test]
    fn test_replace_range_rejects_out_of_bounds() {
        let mut doc = Document::new("short");
        assert!(doc.replace_range(3..99, "x").is_err());
        assert_eq!(doc.as_str(), "short");
    }

    #[test]
    fn test_replace_range_rejects_split_char() {
        let mut doc = Document::new("a•b");
        // '•' occupies bytes 1..4; offset 2 is mid-character
        assert!(doc.replace_range(1..2, " ").is_err());
        assert_eq!(doc.as_str(), "a•b");
    }

    #[test]
    fn test_round_trip() {
        let doc = Document::from("hello".to_string());
        assert_eq!(doc.into_string(), "hello");
    }
}
