/*!
 * Word-level change markup between two texts.
 *
 * Renders the edit between two snapshots as inline markers for human
 * review: removed words as `~~word~~`, added words as `**word**`. The
 * markup is display-only and never fed back into the sync state.
 */

use crate::sync::align::{EditTag, align};

/// Render word-level markup describing the edit from `old_text` to `new_text`.
///
/// Both texts are tokenized on whitespace and aligned. The output keeps the
/// words in document order joined by single spaces, so the original
/// whitespace shape is not preserved. Within a replacement the removed words
/// come before the added ones.
pub fn highlight_words(old_text: &str, new_text: &str) -> String {
    let old_words: Vec<&str> = old_text.split_whitespace().collect();
    let new_words: Vec<&str> = new_text.split_whitespace().collect();

    let mut parts: Vec<String> = Vec::new();
    for op in align(&old_words, &new_words) {
        match op.tag {
            EditTag::Equal => {
                parts.extend(old_words[op.old.clone()].iter().map(|word| (*word).to_string()));
            }
            EditTag::Delete => {
                parts.extend(removed(&old_words[op.old.clone()]));
            }
            EditTag::Insert => {
                parts.extend(added(&new_words[op.new.clone()]));
            }
            EditTag::Replace => {
                parts.extend(removed(&old_words[op.old.clone()]));
                parts.extend(added(&new_words[op.new.clone()]));
            }
        }
    }

    parts.join(" ")
}

fn removed<'a>(words: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    words.iter().map(|word| format!("~~{}~~", word))
}

fn added<'a>(words: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    words.iter().map(|word| format!("**{}**", word))
}
