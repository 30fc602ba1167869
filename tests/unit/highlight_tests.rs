/*!
 * Unit tests for word-level change markup
 */

use promptsync::sync::highlight::highlight_words;

#[test]
fn test_highlightWords_withReplacedWord_shouldMarkRemovedThenAdded() {
    let markup = highlight_words("the cat sat", "the dog sat");

    assert_eq!(markup, "the ~~cat~~ **dog** sat");
}

#[test]
fn test_highlightWords_withIdenticalTexts_shouldContainNoMarkers() {
    let markup = highlight_words("no change here", "no change here");

    assert_eq!(markup, "no change here");
}

#[test]
fn test_highlightWords_withAddedWord_shouldMarkItAdded() {
    let markup = highlight_words("the end", "the very end");

    assert_eq!(markup, "the **very** end");
}

#[test]
fn test_highlightWords_withRemovedWord_shouldMarkItRemoved() {
    let markup = highlight_words("the very end", "the end");

    assert_eq!(markup, "the ~~very~~ end");
}

#[test]
fn test_highlightWords_withEmptyOldText_shouldMarkEverythingAdded() {
    let markup = highlight_words("", "all new");

    assert_eq!(markup, "**all** **new**");
}

#[test]
fn test_highlightWords_withEmptyNewText_shouldMarkEverythingRemoved() {
    let markup = highlight_words("all gone", "");

    assert_eq!(markup, "~~all~~ ~~gone~~");
}

#[test]
fn test_highlightWords_withWhitespaceOnlyChanges_shouldShowNoMarkers() {
    let markup = highlight_words("spaced   out\ntext", "spaced out text");

    assert_eq!(markup, "spaced out text");
}
