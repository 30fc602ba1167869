/*!
 * Unit tests for incremental patch planning and application
 */

use promptsync::sync::patch;

#[test]
fn test_plan_withOneChangedSentence_shouldScheduleOnlyIt() {
    let plan = patch::plan("A. B.", "A. C.", "a. b.");

    let scheduled: Vec<&str> = plan
        .pending_units()
        .iter()
        .map(|unit| unit.text.as_str())
        .collect();
    assert_eq!(scheduled, vec!["C."]);
}

#[test]
fn test_apply_withChangedSecondSentence_shouldSpliceTranslationIn() {
    let plan = patch::plan("Hello. World.", "Hello. Universe.", "안녕. 세상.");

    let scheduled: Vec<&str> = plan
        .pending_units()
        .iter()
        .map(|unit| unit.text.as_str())
        .collect();
    assert_eq!(scheduled, vec!["Universe."]);

    let result = plan.apply(vec!["우주.".to_string()]);
    assert_eq!(result, "안녕. 우주.");
}

#[test]
fn test_plan_withUnchangedText_shouldScheduleNothing() {
    let plan = patch::plan("Hello. World.", "Hello. World.", "안녕. 세상.");

    assert!(plan.is_noop());
    assert_eq!(plan.apply(Vec::new()), "안녕. 세상.");
}

#[test]
fn test_plan_withAppendedSentence_shouldScheduleOnlyTheNewOne() {
    let plan = patch::plan("Hello.", "Hello. Goodbye.", "안녕.");

    let scheduled: Vec<&str> = plan
        .pending_units()
        .iter()
        .map(|unit| unit.text.as_str())
        .collect();
    assert_eq!(scheduled, vec!["Goodbye."]);

    let result = plan.apply(vec!["잘가.".to_string()]);
    assert_eq!(result, "안녕. 잘가.");
}

#[test]
fn test_apply_withDeletedTrailingSentence_shouldDropItsTranslation() {
    let plan = patch::plan("Hello. World.", "Hello.", "안녕. 세상.");

    assert!(plan.is_noop());
    assert_eq!(plan.apply(Vec::new()), "안녕.");
}

#[test]
fn test_plan_withMultipleParagraphs_shouldPatchEachIndependently() {
    let old = "First. Second.\n\nThird. Fourth.";
    let new = "First. Changed.\n\nThird. Fourth.";
    let existing = "첫째. 둘째.\n\n셋째. 넷째.";

    let plan = patch::plan(old, new, existing);

    let scheduled: Vec<(usize, usize, &str)> = plan
        .pending_units()
        .iter()
        .map(|unit| (unit.paragraph, unit.position, unit.text.as_str()))
        .collect();
    assert_eq!(scheduled, vec![(0, 1, "Changed.")]);

    let result = plan.apply(vec!["바뀜.".to_string()]);
    assert_eq!(result, "첫째. 바뀜.\n\n셋째. 넷째.");
}

#[test]
fn test_plan_withRemovedParagraph_shouldDropItsTranslation() {
    let plan = patch::plan("One.\n\nTwo.", "One.", "하나.\n\n둘.");

    assert!(plan.is_noop());
    assert_eq!(plan.apply(Vec::new()), "하나.");
}

#[test]
fn test_plan_withAddedParagraphBeyondOldCount_shouldIgnoreIt() {
    let plan = patch::plan("One.", "One.\n\nTwo.", "하나.");

    assert!(plan.is_noop());
    assert_eq!(plan.apply(Vec::new()), "하나.");
}

#[test]
fn test_plan_withClearedParagraph_shouldBlankWithoutScheduling() {
    let plan = patch::plan("Hello.", "", "안녕.");

    assert!(plan.is_noop());
    assert_eq!(plan.apply(Vec::new()), "");
}

#[test]
fn test_apply_withUnitsMissingTerminalMarks_shouldInsertSeparator() {
    let plan = patch::plan("A. B.", "C. D.", "");

    let scheduled: Vec<&str> = plan
        .pending_units()
        .iter()
        .map(|unit| unit.text.as_str())
        .collect();
    assert_eq!(scheduled, vec!["C.", "D."]);

    let result = plan.apply(vec!["씨".to_string(), "디".to_string()]);
    assert_eq!(result, "씨. 디");
}

#[test]
fn test_apply_withShortExistingTranslation_shouldAppendPastItsEnd() {
    let plan = patch::plan("A. B. C.", "A. B. X.", "a.");

    let scheduled: Vec<&str> = plan
        .pending_units()
        .iter()
        .map(|unit| unit.text.as_str())
        .collect();
    assert_eq!(scheduled, vec!["X."]);

    let result = plan.apply(vec!["x.".to_string()]);
    assert_eq!(result, "a. x.");
}

#[test]
fn test_apply_joiningAfterExclamation_shouldUseSingleSpace() {
    let plan = patch::plan("Stop! Go.", "Stop! Run.", "멈춰! 가.");

    let result = plan.apply(vec!["뛰어.".to_string()]);
    assert_eq!(result, "멈춰! 뛰어.");
}
