//! Text utilities for presenting HTML field content in search results.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::config::CONTEXT_WINDOW;

/// Regex matching an HTML tag.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HTML_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Strip HTML tags from text, leaving only the character data.
///
/// This is a display heuristic for search-result context, not an HTML
/// parser: anything between `<` and the next `>` is removed.
///
/// # Examples
/// ```
/// use quizpack_core::text::strip_html_tags;
///
/// assert_eq!(strip_html_tags("<p>What is <b>2 + 2</b>?</p>"), "What is 2 + 2?");
/// assert_eq!(strip_html_tags("no markup"), "no markup");
/// ```
#[must_use]
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG_PATTERN.replace_all(text, "").into_owned()
}

/// Move a byte index left until it sits on a `char` boundary.
fn floor_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Move a byte index right until it sits on a `char` boundary.
fn ceil_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Build a context snippet around a match range.
///
/// Takes a window of [`CONTEXT_WINDOW`] characters on each side of the
/// match, strips HTML tags, and adds an ellipsis on each side that was
/// truncated. The window is counted in `char`s, not bytes, so multibyte
/// text gets the same amount of visible context as ASCII.
///
/// # Arguments
/// * `text` - Full field text the match was found in
/// * `range` - Byte range of the match within `text`
#[must_use]
pub fn context_snippet(text: &str, range: &Range<usize>) -> String {
    let match_start = floor_boundary(text, range.start.min(text.len()));
    let match_end = ceil_boundary(text, range.end.min(text.len()));

    let start = text[..match_start]
        .char_indices()
        .rev()
        .nth(CONTEXT_WINDOW - 1)
        .map_or(0, |(index, _)| index);
    let end = text[match_end..]
        .char_indices()
        .nth(CONTEXT_WINDOW)
        .map_or(text.len(), |(index, _)| match_end + index);

    let mut snippet = strip_html_tags(&text[start..end]);
    if start > 0 {
        snippet.insert(0, '…');
    }
    if end < text.len() {
        snippet.push('…');
    }
    snippet
}
