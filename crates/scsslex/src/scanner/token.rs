use std::sync::Arc;

use super::PatternId;
use crate::Span;

/// A named span of matched text.
///
/// Tokens do not borrow the scanner's input; resolve their text with
/// [`Token::text`] or [`Scanner::text`](crate::Scanner::text).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Token {
    /// The pattern that matched.
    pub pattern: PatternId,
    /// The name of that pattern.
    pub name: Arc<str>,
    /// Where the match lies in the scanned input.
    pub span: Span,
}

impl Token {
    /// Byte offset where the match starts.
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Byte offset one past the end of the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Returns `true` for a zero-width match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The matched text, resolved against the input it was scanned from.
    ///
    /// Returns the empty string if the span does not fit `input`.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.span.range()).unwrap_or_default()
    }
}
