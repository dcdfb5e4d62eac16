//! Capture-group template expansion for regex replacements.
//!
//! Templates are user-authored strings with two recognized forms:
//!
//! - `\$` emits a literal `$` (the backslash is consumed)
//! - `$N` (one or more digits) references capture group N; `$0` is the
//!   whole match
//!
//! Any `$` not followed by digits, and every other character, is emitted
//! unchanged. A reference to a group that did not participate in the match,
//! or that does not exist in the pattern, expands to the empty string; it is
//! never an error.

use regex::Captures;

/// Expand a replacement template against a regex match.
///
/// The expansion only consults the capture-group table, so it works the
/// same regardless of which regex features (anchors, lookaround,
/// non-capturing groups) produced the match.
///
/// # Examples
/// ```
/// use regex::Regex;
/// use quizpack_core::template::expand_template;
///
/// let re = Regex::new(r"(\w+) (\w+)").unwrap();
/// let caps = re.captures("John Doe").unwrap();
/// assert_eq!(expand_template(&caps, "$2, $1"), "Doe, John");
/// ```
#[must_use]
pub fn expand_template(caps: &Captures<'_>, template: &str) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'$') => {
                chars.next();
                result.push('$');
            }
            '$' if chars.peek().is_some_and(|c| c.is_ascii_digit()) => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|c| c.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                // Out-of-range or non-participating groups expand to "".
                if let Ok(index) = digits.parse::<usize>() {
                    if let Some(group) = caps.get(index) {
                        result.push_str(group.as_str());
                    }
                }
            }
            other => result.push(other),
        }
    }

    result
}
