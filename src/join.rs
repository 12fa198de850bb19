// WHY: joining is purely structural; it removes the hard breaks the
// classifier already approved and never re-wraps to any column width

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use regex_automata::Input;

/// A hard break: a non-space character, a newline (`\r\n` counts as one) with
/// optional horizontal whitespace on either side, then another non-space
/// character. Requiring non-space on both sides means blank regions and
/// trailing whitespace are never fused.
const HARD_BREAK: &str = r"[^\s][ \t]*\r?\n[ \t]*[^\s]";

/// Joins hard line breaks within a single paragraph's text.
#[derive(Debug)]
pub struct LineJoiner {
    regex: Regex,
}

impl LineJoiner {
    pub fn new() -> Result<Self> {
        let regex = Regex::new(HARD_BREAK).context("hard break pattern failed to compile")?;
        Ok(Self { regex })
    }

    /// Replace every hard break with a single space, left to right.
    ///
    /// Returns the joined text and the number of breaks removed. Each search
    /// resumes at the trailing character of the previous match so chained
    /// breaks (`a\nb\nc`) collapse in one pass, which is the fixpoint of the
    /// replace-until-none-remain contract.
    pub fn join(&self, text: &str) -> (String, usize) {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut at = 0;
        let mut removed = 0;

        while let Some(m) = self.regex.find(Input::new(text).range(at..)) {
            let Some(head) = text[m.start()..].chars().next() else {
                break;
            };
            let Some(tail) = text[..m.end()].chars().next_back() else {
                break;
            };
            let tail_start = m.end() - tail.len_utf8();

            out.push_str(&text[copied..m.start()]);
            out.push(head);
            out.push(' ');

            copied = tail_start;
            at = tail_start;
            removed += 1;
        }

        out.push_str(&text[copied..]);
        (out, removed)
    }
}
