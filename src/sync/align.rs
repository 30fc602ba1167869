/*!
 * Sequence alignment between unit lists.
 *
 * Thin wrapper around the `similar` diff engine exposing opcode-style edit
 * scripts over arbitrary slices. The patcher walks these opcodes to decide
 * which sentence units an edit actually touched, and the highlighter reuses
 * them at word granularity.
 */

use std::hash::Hash;
use std::ops::Range;

use similar::{Algorithm, DiffTag, capture_diff_slices};

/// Kind of edit an opcode describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTag {
    /// Both ranges hold the same units
    Equal,
    /// The old range is replaced by the new range
    Replace,
    /// The new range is inserted; the old range is empty
    Insert,
    /// The old range is deleted; the new range is empty
    Delete,
}

impl From<DiffTag> for EditTag {
    fn from(tag: DiffTag) -> Self {
        match tag {
            DiffTag::Equal => EditTag::Equal,
            DiffTag::Replace => EditTag::Replace,
            DiffTag::Insert => EditTag::Insert,
            DiffTag::Delete => EditTag::Delete,
        }
    }
}

/// One opcode of an edit script
///
/// `old` and `new` are half-open index ranges into the aligned slices, in
/// the shape classic sequence matchers emit. Walking the opcodes in order
/// visits both sequences completely and in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    /// What happened to the covered ranges
    pub tag: EditTag,
    /// Covered range of the old sequence
    pub old: Range<usize>,
    /// Covered range of the new sequence
    pub new: Range<usize>,
}

/// Compute the edit script that turns `old` into `new`.
///
/// Uses Myers diff, so the script is deterministic for identical inputs.
/// Aligning a non-empty sequence with itself yields a single `Equal` opcode
/// spanning the whole sequence.
pub fn align<T>(old: &[T], new: &[T]) -> Vec<EditOp>
where
    T: Eq + Hash + Ord,
{
    capture_diff_slices(Algorithm::Myers, old, new)
        .iter()
        .map(|op| {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            EditOp {
                tag: tag.into(),
                old: old_range,
                new: new_range,
            }
        })
        .collect()
}
