// WHY: forbidden patterns gate reflow per line; a single match anywhere in a
// paragraph vetoes the whole paragraph, so patterns stay line-local and simple

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use tracing::debug;

/// Horizontal rules built from runs of separator glyphs (`----`, `====`, ...).
const SEPARATOR_RULE: &str = r"^[ \t]*[-+*=—]{2,}";

/// Lines that read as source code rather than prose: a comment marker, or an
/// opening parenthesis not immediately followed by an upper-case letter or a
/// typographic open quote (so `(defun foo` is code, `(See below.)` is prose).
const CODE_LINE: &str = r#"^[ \t]*(?:;|#|//|\((?:$|[^\p{Lu}“]))"#;

/// Deeply indented lines are display blocks, not flowable text.
const DEEP_INDENT: &str = r"^[ \t]{8,}";

/// Section labels emitted by inspection panels, possibly with trailing blanks.
const SECTION_LABEL: &str =
    r"^(?:Signature|Documentation|References|Debugging|Source Code|Symbol Properties)[ \t]*$";

/// Named, ordered collection of forbidden-line patterns for one document
/// profile. Immutable once handed to the engine.
#[derive(Debug)]
pub struct RuleSet {
    name: String,
    patterns: Vec<Regex>,
    sources: Vec<String>,
}

impl RuleSet {
    /// Compile a ruleset from pattern strings.
    ///
    /// Fails with the offending pattern in the error if any string is not a
    /// valid regular expression; the engine cannot run without a compiled set.
    pub fn from_patterns<S: AsRef<str>>(name: &str, patterns: &[S]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        let mut sources = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).with_context(|| {
                format!("ruleset {name:?}: forbidden pattern {pattern:?} failed to compile")
            })?;
            compiled.push(regex);
            sources.push(pattern.to_string());
        }
        debug!(
            ruleset = name,
            patterns = compiled.len(),
            "Compiled forbidden-pattern ruleset"
        );
        Ok(Self {
            name: name.to_string(),
            patterns: compiled,
            sources,
        })
    }

    /// Profile for reference-manual style documents: separator rules, code or
    /// comment lines, and display blocks indented 8+ columns are all off
    /// limits.
    pub fn reference_manual() -> Result<Self> {
        Self::from_patterns("reference-manual", &[SEPARATOR_RULE, CODE_LINE, DEEP_INDENT])
    }

    /// Profile for inspection-panel style documents: fixed section labels plus
    /// the same code-line rule as the reference-manual profile.
    pub fn inspection_panel() -> Result<Self> {
        Self::from_patterns("inspection-panel", &[SECTION_LABEL, CODE_LINE])
    }

    /// Append an extra forbidden pattern to the set.
    pub fn push_pattern(&mut self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).with_context(|| {
            format!(
                "ruleset {:?}: forbidden pattern {pattern:?} failed to compile",
                self.name
            )
        })?;
        self.patterns.push(regex);
        self.sources.push(pattern.to_string());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern_sources(&self) -> &[String] {
        &self.sources
    }

    /// True if any line of the paragraph matches any pattern in the set.
    ///
    /// Lines keep their leading whitespace (patterns anchor on it); only the
    /// line terminator is stripped.
    pub fn is_forbidden(&self, paragraph: &str) -> bool {
        paragraph
            .lines()
            .any(|line| self.patterns.iter().any(|regex| regex.is_match(line)))
    }
}
