//! Whitespace normalization for selector and property text.
//!
//! Source text handed to the locator may carry line-number hints inserted by
//! an upstream preprocessor: a [`SEPARATOR`] (`NUL`) immediately followed by
//! the decimal line number of the text that follows it. Normalization removes
//! those markers, splits the text into logical lines on `NUL` and `\n`, trims
//! every line and joins the non-blank ones with a single `\n`.
//!
//! The hint must follow the separator. Digits written before it
//! (`12\0text`) are kept as ordinary content, so text annotated in that
//! order has to be rewritten as `\012text` before it is located.
//!
//! ```
//! use scsslex::{SEPARATOR, strip};
//!
//! let text = format!("  {SEPARATOR}12 a,  \n\n  b ;");
//! let stripped = strip(&text);
//! assert_eq!(stripped.text, "a,\nb");
//! assert_eq!(stripped.line_number, Some(12));
//! ```

use std::borrow::Cow;

/// Separates a line-number hint from the text it annotates.
pub const SEPARATOR: char = '\0';

/// The result of [`strip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped<'a> {
    /// The normalized text. Borrowed from the input whenever a single line
    /// survives, so normalizing normalized text never allocates.
    pub text: Cow<'a, str>,
    /// The first line-number hint found in the input, if any.
    pub line_number: Option<usize>,
}

impl Stripped<'_> {
    /// Length of the normalized text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if nothing but whitespace, semicolons and line-number
    /// hints were present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Normalizes `text` and reports the first embedded line number.
#[must_use]
pub fn strip(text: &str) -> Stripped<'_> {
    let mut line_number = None;
    let mut first: Option<&str> = None;
    let mut joined: Option<String> = None;

    for line in Lines::new(text) {
        if line_number.is_none() {
            line_number = line.marker;
        }
        if line.content.is_empty() {
            continue;
        }
        match (&mut joined, first) {
            (Some(buf), _) => {
                buf.push('\n');
                buf.push_str(line.content);
            }
            (None, Some(prev)) => {
                let mut buf = String::with_capacity(text.len());
                buf.push_str(prev);
                buf.push('\n');
                buf.push_str(line.content);
                joined = Some(buf);
            }
            (None, None) => first = Some(line.content),
        }
    }

    let text = match (joined, first) {
        (Some(buf), _) => Cow::Owned(buf),
        (None, Some(line)) => Cow::Borrowed(line),
        (None, None) => Cow::Borrowed(""),
    };
    Stripped { text, line_number }
}

/// Returns `true` if `text` normalizes to the empty string.
///
/// Equivalent to `strip(text).is_empty()` without building the result.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    Lines::new(text).all(|line| line.content.is_empty())
}

fn is_trimmable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | ';')
}

/// One logical line: trimmed content plus the line-number hint that
/// introduced it, if the line started right after a separator.
struct Line<'a> {
    content: &'a str,
    marker: Option<usize>,
}

/// Splits text on `\n` and [`SEPARATOR`], peeling line-number hints off the
/// lines that follow a separator.
struct Lines<'a> {
    rest: Option<&'a str>,
    after_separator: bool,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            rest: Some(text),
            after_separator: false,
        }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        let rest = self.rest?;
        let (mut piece, next_after_separator) = match rest.find(['\n', SEPARATOR]) {
            Some(i) => {
                self.rest = Some(&rest[i + 1..]);
                (&rest[..i], rest.as_bytes()[i] == 0)
            }
            None => {
                self.rest = None;
                (rest, false)
            }
        };

        let mut marker = None;
        if self.after_separator {
            let digits = piece.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 {
                marker = piece[..digits].parse().ok();
                piece = &piece[digits..];
            }
        }
        self.after_separator = next_after_separator;

        Some(Line {
            content: piece.trim_matches(is_trimmable),
            marker,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", "")]
    #[case::only_blanks(" \t \n\n ;; \n", "")]
    #[case::single_line("  .a  ", ".a")]
    #[case::multi_line("a,\n   \n  b  ", "a,\nb")]
    #[case::semicolons(";color: red;", "color: red")]
    #[case::crlf("a,\r\nb\r\n", "a,\nb")]
    #[case::inner_spaces_kept("a   b", "a   b")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip(input).text, expected);
        assert_eq!(is_blank(input), expected.is_empty());
    }

    #[test]
    fn reports_first_line_number_only() {
        let stripped = strip("\u{0}3 a,\n\u{0}4 b");
        assert_eq!(stripped.text, "a,\nb");
        assert_eq!(stripped.line_number, Some(3));
    }

    #[test]
    fn separator_without_digits_is_a_line_break() {
        let stripped = strip("a\u{0} b");
        assert_eq!(stripped.text, "a\nb");
        assert_eq!(stripped.line_number, None);
    }

    #[test]
    fn digits_not_after_separator_are_content() {
        let stripped = strip("12 a");
        assert_eq!(stripped.text, "12 a");
        assert_eq!(stripped.line_number, None);
    }

    #[test]
    fn digits_before_separator_are_content() {
        let stripped = strip("12\u{0}.a");
        assert_eq!(stripped.text, "12\n.a");
        assert_eq!(stripped.line_number, None);
    }

    #[test]
    fn marker_on_blank_line_still_reported() {
        let stripped = strip("\u{0}7   \n .b");
        assert_eq!(stripped.text, ".b");
        assert_eq!(stripped.line_number, Some(7));
    }

    #[test]
    fn single_line_borrows() {
        assert!(matches!(strip("  .a  ").text, Cow::Borrowed(".a")));
    }

    #[quickcheck_macros::quickcheck]
    fn idempotent(input: String) -> bool {
        let once = strip(&input).text.into_owned();
        let twice = strip(&once);
        twice.text == once && twice.line_number.is_none()
    }
}
