// WHY: structure classification decides prose vs list/markup from the
// paragraph text alone; it is pure and idempotent so a second reflow pass
// re-approves paragraphs it already joined

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

/// Line-prefix tokens that open a list item: bullet glyphs, numbered markers
/// like `1.` `(1)` `1)`, and lettered markers like `a.` `(a)` `a)`. Each form
/// requires a following blank so `*emphasis*` and bare numerals stay prose.
const BULLET_MARKER: &str = r"(?:[•‣◦*]|\(?[0-9]+[.)]|\(?[A-Za-z][.)])[ \t]";

/// A flowable sentence starts with an upper-case letter (an opening quote may
/// precede it) and ends in terminal punctuation, optionally closed by a quote
/// or parenthesis. `(?s)` lets the middle span the paragraph's hard breaks.
const SENTENCE_MATCH: &str = r#"(?s)^[“"]?\p{Lu}.*[.:)"”]$"#;

/// Recognizer for bullet and numbered list markers.
#[derive(Debug)]
pub struct BulletMarker {
    regex: Regex,
}

impl BulletMarker {
    pub fn new() -> Result<Self> {
        let regex =
            Regex::new(BULLET_MARKER).context("bullet marker pattern failed to compile")?;
        Ok(Self { regex })
    }

    /// True if the text begins with a marker.
    pub fn matches_at_start(&self, text: &str) -> bool {
        self.regex
            .is_match(Input::new(text).anchored(Anchored::Yes))
    }

    /// Count marker occurrences anywhere in the text.
    ///
    /// Each search resumes one character past the previous match's START, not
    /// its end. Markers packed close together therefore all count, which is
    /// exactly the signal the list check needs; keep this scan semantic.
    pub fn count(&self, text: &str) -> usize {
        let mut count = 0;
        let mut at = 0;
        while at <= text.len() {
            let Some(m) = self.regex.find(Input::new(text).range(at..)) else {
                break;
            };
            count += 1;
            let step = text[m.start()..]
                .chars()
                .next()
                .map_or(1, |c| c.len_utf8());
            at = m.start() + step;
        }
        count
    }

    /// Strip a single leading marker, returning the remainder.
    pub fn strip_leading<'a>(&self, text: &'a str) -> &'a str {
        match self.regex.find(Input::new(text).anchored(Anchored::Yes)) {
            Some(m) => &text[m.end()..],
            None => text,
        }
    }
}

/// The prose/structure classifier: bullet handling plus the sentence gate.
#[derive(Debug)]
pub struct Classifier {
    bullet: BulletMarker,
    sentence: Regex,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let sentence =
            Regex::new(SENTENCE_MATCH).context("sentence match pattern failed to compile")?;
        Ok(Self {
            bullet: BulletMarker::new()?,
            sentence,
        })
    }

    /// Decide whether a paragraph is flowable prose.
    ///
    /// A paragraph containing more than one bullet marker is a list and is
    /// never joined. With exactly one leading marker, the sentence gate runs
    /// on the remainder after the marker; otherwise on the whole trimmed text.
    pub fn looks_like_prose(&self, paragraph: &str) -> bool {
        let trimmed = paragraph.trim();
        let candidate = if self.bullet.matches_at_start(trimmed) {
            if self.bullet.count(trimmed) > 1 {
                return false;
            }
            self.bullet.strip_leading(trimmed).trim()
        } else {
            trimmed
        };
        self.sentence.is_match(candidate)
    }
}
