use core::fmt;

use thiserror::Error;

/// Errors raised by [`Scanner::tokenize`](crate::Scanner::tokenize) and the
/// [`TokenCursor`](crate::TokenCursor).
///
/// Every variant aborts only the call that returned it. Tokens already in
/// the history stay there and remain replayable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum ScanError {
    /// No pattern matches at the cursor.
    #[error("SyntaxError[@ char {pos}: Bad token found]")]
    BadToken {
        /// Cursor position of the failed match.
        pos: usize,
    },

    /// No pattern of the restriction set (nor any ignored pattern) matches
    /// at the cursor.
    #[error(
        "SyntaxError[@ char {pos}: Bad token found while trying to find one of the restricted tokens: {}]",
        Quoted(.restrictions)
    )]
    RestrictedToken {
        /// Cursor position of the failed match.
        pos: usize,
        /// The names the match was restricted to.
        restrictions: Vec<String>,
    },

    /// A stored token was requested with a restriction set naming a pattern
    /// its original restriction set did not.
    #[error("Unimplemented: restriction set changed")]
    UnimplementedRestrictionChange {
        /// Index of the requested token.
        index: usize,
    },

    /// The requested index is past the next token to scan, or the scan made
    /// no progress.
    #[error("No more tokens")]
    NoMoreTokens {
        /// Index of the requested token.
        index: usize,
    },

    /// The next token is not of the type the caller asked for.
    #[error("SyntaxError[@ char {pos}: Trying to find {expected}]")]
    UnexpectedToken {
        /// The name the caller asked for.
        expected: String,
        /// The name of the token found instead.
        found: String,
        /// Start of the token found instead.
        pos: usize,
    },

    /// A pattern source failed to compile.
    #[error("Invalid pattern {name}: {message}")]
    InvalidPattern {
        /// Name of the offending pattern.
        name: String,
        /// The compiler's diagnostic.
        message: String,
    },

    /// A match attempt gave up, typically on its backtracking limit.
    #[error("Pattern {name} aborted @ char {pos}: {message}")]
    MatchAborted {
        /// Name of the pattern being tried.
        name: String,
        /// Cursor position of the attempt.
        pos: usize,
        /// The matcher's diagnostic.
        message: String,
    },
}

impl ScanError {
    /// Returns `true` for the syntax errors a lookahead treats as "no
    /// token here": [`BadToken`](Self::BadToken) and
    /// [`RestrictedToken`](Self::RestrictedToken).
    #[must_use]
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Self::BadToken { .. } | Self::RestrictedToken { .. })
    }
}

/// Renders names as `'a', 'b'`.
struct Quoted<'a>(&'a [String]);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restricted_message_lists_names() {
        let err = ScanError::RestrictedToken {
            pos: 4,
            restrictions: vec!["num".into(), "id".into()],
        };
        assert_eq!(
            err.to_string(),
            "SyntaxError[@ char 4: Bad token found while trying to find one of the restricted tokens: 'num', 'id']"
        );
    }

    #[test]
    fn bad_token_message() {
        assert_eq!(
            ScanError::BadToken { pos: 0 }.to_string(),
            "SyntaxError[@ char 0: Bad token found]"
        );
    }
}
