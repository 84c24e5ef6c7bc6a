/*!
 * Tests for markup removal
 */

use srtshift::formatting::strip_markup;

#[test]
fn test_strip_markup_withNestedStyling_shouldKeepOnlyText() {
    assert_eq!(strip_markup("<b><i>Bold italic</i></b>"), "Bold italic");
    assert_eq!(strip_markup("<font face=\"Arial\" size=\"20\">Big</font> text"), "Big text");
}

#[test]
fn test_strip_markup_withLoneOpeningBracket_shouldBeUnchanged() {
    assert_eq!(strip_markup("a < b"), "a < b");
    assert_eq!(strip_markup("x<"), "x<");
}

#[test]
fn test_strip_markup_withHeartLookalike_shouldEatUpToNextClosingBracket() {
    // Anything between a < and the next > counts as a tag
    assert_eq!(strip_markup("<3 you, 2 > 1"), " 1");
}

#[test]
fn test_strip_markup_withSeveralTags_shouldRemoveEachIndependently() {
    assert_eq!(strip_markup("<i>one</i> and <u>two</u>"), "one and two");
}
