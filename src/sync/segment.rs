/*!
 * Two-level text segmentation.
 *
 * Texts are split into paragraphs on blank lines, and paragraphs into
 * sentence units at terminal punctuation. Units are the granularity at which
 * edits are detected and retranslated, so both splits must be cheap and
 * deterministic.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Boundary between two sentence units: a terminal mark followed by
/// whitespace. The mark stays with the unit on its left, the whitespace run
/// is consumed by the split.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+").unwrap()
});

/// Split a text into paragraphs on blank lines.
///
/// The split is the exact inverse of joining with `"\n\n"`, so
/// `split_paragraphs(text).join("\n\n") == text` holds for any input.
/// Paragraphs are returned untrimmed.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n").collect()
}

/// Split a paragraph into sentence units.
///
/// The paragraph is trimmed once, then cut after every `.`, `!` or `?` that
/// is followed by whitespace. A paragraph without terminal punctuation is a
/// single unit, and an empty paragraph yields a single empty unit, so the
/// result is never an empty vector.
///
/// Abbreviations ("e.g. ") split like sentence ends. That over-splitting is
/// harmless here: a unit is only a retranslation boundary, not a display
/// unit.
pub fn split_sentences(paragraph: &str) -> Vec<&str> {
    let trimmed = paragraph.trim();
    let mut units = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(trimmed) {
        // The terminal mark is the single ASCII byte at the match start.
        units.push(&trimmed[start..boundary.start() + 1]);
        start = boundary.end();
    }

    units.push(&trimmed[start..]);
    units
}
