/*!
 * Inline markup removal for caption text.
 *
 * SRT captions may carry HTML-like styling (`<i>`, `<b>`, `<font color=...>`).
 * Everything from a `<` up to the next `>` is treated as a tag and removed. There is
 * no notion of nesting or of valid HTML: text such as `<3 and >` is removed as well,
 * while a lone `<` or `>` stays untouched.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Tag pattern: `<`, at least one non-`>` character, `>`
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

/// Remove every markup tag from a caption line
pub fn strip_markup(line: &str) -> String {
    TAG_REGEX.replace_all(line, "").into_owned()
}
