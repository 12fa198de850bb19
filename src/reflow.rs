// WHY: the orchestrator is the only place that mutates the document and the
// only place that contains faults; everything below it is pure text-in/text-out

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classify::Classifier;
use crate::document::Document;
use crate::join::LineJoiner;
use crate::paragraph::{next_paragraph, Span};
use crate::ruleset::RuleSet;

/// Per-invocation reflow statistics.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReflowStats {
    /// Paragraphs visited by the scan
    pub paragraphs_scanned: u64,
    /// Paragraphs whose hard breaks were joined
    pub paragraphs_joined: u64,
    /// Paragraphs vetoed by a forbidden-pattern match
    pub forbidden_vetoes: u64,
    /// Paragraphs vetoed by the structure classifier
    pub structure_vetoes: u64,
    /// Hard breaks removed across all joined paragraphs
    pub breaks_removed: u64,
    /// Fault message if the scan aborted early; the document up to the fault
    /// point is still fully reflowed
    pub fault: Option<String>,
}

/// Reflow `document` in place under `ruleset`.
///
/// Paragraphs are scanned in order; each one is vetted by the forbidden
/// filter, then the structure classifier, and only then joined. Each
/// paragraph's join is a single atomic splice. An unexpected fault while
/// handling a paragraph is reported once on the returned stats and aborts the
/// remaining scan fail-soft: earlier joins stand, later paragraphs are left
/// untouched, and nothing is half-joined.
pub fn reflow(document: &mut Document, ruleset: &RuleSet) -> ReflowStats {
    let mut stats = ReflowStats::default();

    let engines = Classifier::new().and_then(|classifier| {
        let joiner = LineJoiner::new()?;
        Ok((classifier, joiner))
    });
    let (classifier, joiner) = match engines {
        Ok(built) => built,
        Err(err) => {
            warn!("Reflow could not start: {err:#}");
            stats.fault = Some(format!("{err:#}"));
            return stats;
        }
    };

    let mut cursor = 0usize;
    while let Some(span) = next_paragraph(document.as_str(), cursor) {
        stats.paragraphs_scanned += 1;
        match reflow_paragraph(document, span, ruleset, &classifier, &joiner, &mut stats) {
            Ok(next) => cursor = next,
            Err(err) => {
                warn!(
                    paragraph_start = span.start,
                    "Reflow aborted mid-document: {err:#}"
                );
                stats.fault = Some(format!("{err:#}"));
                break;
            }
        }
    }

    info!(
        ruleset = ruleset.name(),
        paragraphs_scanned = stats.paragraphs_scanned,
        paragraphs_joined = stats.paragraphs_joined,
        breaks_removed = stats.breaks_removed,
        "Reflow complete"
    );
    stats
}

/// Handle one paragraph; returns the offset to resume scanning from.
fn reflow_paragraph(
    document: &mut Document,
    span: Span,
    ruleset: &RuleSet,
    classifier: &Classifier,
    joiner: &LineJoiner,
    stats: &mut ReflowStats,
) -> Result<usize> {
    let text = &document.as_str()[span.range()];

    if ruleset.is_forbidden(text) {
        debug!(start = span.start, "Paragraph vetoed by forbidden pattern");
        stats.forbidden_vetoes += 1;
        return Ok(span.end);
    }
    if !classifier.looks_like_prose(text) {
        debug!(start = span.start, "Paragraph vetoed by structure classifier");
        stats.structure_vetoes += 1;
        return Ok(span.end);
    }

    let (joined, removed) = joiner.join(text);
    if removed == 0 {
        return Ok(span.end);
    }

    // The whole paragraph is spliced in one edit; later offsets shift, so the
    // scan resumes from the new end rather than the pre-edit span.
    let resume_at = span.start + joined.len();
    document.replace_range(span.range(), &joined)?;
    stats.paragraphs_joined += 1;
    stats.breaks_removed += removed as u64;
    Ok(resume_at)
}
