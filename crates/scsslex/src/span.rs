//! Byte ranges into a source buffer.

use core::ops::Range;

/// A half-open byte range `[start, end)` into a source buffer.
///
/// Spans never own text; they are resolved against the buffer they were
/// produced from with [`Span::slice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Byte offset of the first byte in the span.
    pub start: usize,
    /// Byte offset one past the last byte in the span.
    pub end: usize,
}

impl Span {
    /// Creates a span covering `start..end`.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of bytes covered by the span.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the span as a `Range` suitable for slicing.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Resolves the span against `text`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds for `text` or does not fall on
    /// UTF-8 character boundaries. Spans handed out by this crate always
    /// refer to the buffer they were produced from and satisfy both.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range()]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_resolves_against_text() {
        let span = Span::new(2, 5);
        assert_eq!(span.slice("a {b} c"), "{b}");
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }

    #[test]
    fn empty_span_at_end_of_text() {
        let span = Span::from(3..3);
        assert!(span.is_empty());
        assert_eq!(span.slice("abc"), "");
    }
}
