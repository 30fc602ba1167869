/*!
 * Incremental patch planning and application.
 *
 * A patch turns the previous snapshot of the edited pane, its new text and
 * the other pane's current translation into an updated translation that
 * retranslates only the sentence units the edit touched. Planning is pure
 * and synchronous; the caller translates the scheduled units and splices
 * them back in with [`PatchPlan::apply`]. Nothing is shared with the engine
 * state, so an abandoned plan leaves no trace.
 */

use log::{debug, warn};

use crate::sync::align::{EditTag, align};
use crate::sync::segment::{split_paragraphs, split_sentences};

/// A sentence unit scheduled for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUnit {
    /// Index of the paragraph the unit belongs to
    pub paragraph: usize,
    /// Unit position within the paragraph, indexed against the new source
    pub position: usize,
    /// Source text to translate
    pub text: String,
}

/// Per-paragraph splice buffer
#[derive(Debug)]
struct ParagraphBuffer {
    /// Translated units, seeded from the existing translation
    units: Vec<String>,
    /// Unit count of the new source paragraph; the rendered buffer is
    /// trimmed to this length so stale tail units from the existing
    /// translation never survive a shrinking edit
    new_unit_count: usize,
}

/// A planned incremental patch
///
/// Holds one splice buffer per paragraph plus the ordered list of units that
/// still need translating. Created by [`plan`], consumed by
/// [`PatchPlan::apply`].
#[derive(Debug)]
pub struct PatchPlan {
    paragraphs: Vec<ParagraphBuffer>,
    pending: Vec<PendingUnit>,
}

impl PatchPlan {
    /// Units that must be translated before the plan can be applied
    pub fn pending_units(&self) -> &[PendingUnit] {
        &self.pending
    }

    /// Whether the plan schedules no translations
    pub fn is_noop(&self) -> bool {
        self.pending.is_empty()
    }

    /// Splice the translations into the buffers and render the result.
    ///
    /// `translations` must hold exactly one entry per pending unit, in the
    /// order [`PatchPlan::pending_units`] returns them.
    pub fn apply(mut self, translations: Vec<String>) -> String {
        assert_eq!(
            translations.len(),
            self.pending.len(),
            "one translation required per pending unit"
        );

        for (unit, translated) in self.pending.iter().zip(translations) {
            write_unit(
                &mut self.paragraphs[unit.paragraph].units,
                unit.position,
                translated,
            );
        }

        self.paragraphs
            .iter_mut()
            .map(|paragraph| {
                paragraph.units.truncate(paragraph.new_unit_count);
                join_units(&paragraph.units)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Plan the patch for one edit.
///
/// Paragraphs are matched by index. When the paragraph count changed, only
/// the shared prefix is patched and the extra paragraphs on the longer side
/// are dropped from the result. Within each paragraph the old and new unit
/// sequences are aligned and the replaced or inserted units are scheduled,
/// with two exceptions:
///
/// - units that are positionally identical in both sequences are reused
///   even when the alignment puts them inside a changed range
/// - whitespace-only units get an empty translation without a provider call
pub fn plan(old_source: &str, new_source: &str, existing_translated: &str) -> PatchPlan {
    let old_paragraphs = split_paragraphs(old_source);
    let new_paragraphs = split_paragraphs(new_source);
    let translated_paragraphs = split_paragraphs(existing_translated);

    if old_paragraphs.len() != new_paragraphs.len() {
        warn!(
            "Paragraph count changed from {} to {}, extra paragraphs are dropped",
            old_paragraphs.len(),
            new_paragraphs.len()
        );
    }

    let shared = old_paragraphs.len().min(new_paragraphs.len());
    let mut paragraphs = Vec::with_capacity(shared);
    let mut pending = Vec::new();

    for index in 0..shared {
        let old_units = split_sentences(old_paragraphs[index]);
        let new_units = split_sentences(new_paragraphs[index]);

        let mut units: Vec<String> = translated_paragraphs
            .get(index)
            .map(|paragraph| {
                split_sentences(paragraph)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut scheduled = 0;
        for op in align(&old_units, &new_units) {
            if !matches!(op.tag, EditTag::Replace | EditTag::Insert) {
                continue;
            }

            for position in op.new.clone() {
                if position < old_units.len() && new_units[position] == old_units[position] {
                    continue;
                }

                let text = new_units[position];
                if text.trim().is_empty() {
                    write_unit(&mut units, position, String::new());
                    continue;
                }

                pending.push(PendingUnit {
                    paragraph: index,
                    position,
                    text: text.to_string(),
                });
                scheduled += 1;
            }
        }

        debug!(
            "Paragraph {}: {} of {} unit(s) scheduled for translation",
            index,
            scheduled,
            new_units.len()
        );

        paragraphs.push(ParagraphBuffer {
            units,
            new_unit_count: new_units.len(),
        });
    }

    PatchPlan {
        paragraphs,
        pending,
    }
}

/// Overwrite the unit at `position`, appending when the buffer is shorter
fn write_unit(units: &mut Vec<String>, position: usize, translated: String) {
    if position < units.len() {
        units[position] = translated;
    } else {
        units.push(translated);
    }
}

/// Join translated units back into a paragraph.
///
/// Units that already end with a terminal mark are joined with a single
/// space. Units without one get a `". "` separator so the unit boundary
/// survives the next segmentation of this paragraph. Empty units are
/// skipped, which keeps blank paragraphs blank.
fn join_units(units: &[String]) -> String {
    let mut joined = String::new();
    for unit in units.iter().filter(|unit| !unit.is_empty()) {
        if !joined.is_empty() {
            if joined.ends_with(['.', '!', '?']) {
                joined.push(' ');
            } else {
                joined.push_str(". ");
            }
        }
        joined.push_str(unit);
    }
    joined
}
