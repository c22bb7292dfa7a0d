use std::sync::Arc;

use super::{ScanError, Scanner};

/// One-token lookahead over a [`Scanner`], as used by recursive-descent
/// grammars.
///
/// The cursor holds the index of the next token to consume. [`peek`]
/// inspects that token without consuming it; [`scan`] consumes it after
/// checking its name. Peeks and scans at the same index share one history
/// entry, so the restriction set of a peek must cover the type later scanned.
///
/// [`peek`]: TokenCursor::peek
/// [`scan`]: TokenCursor::scan
#[derive(Debug, Clone)]
pub struct TokenCursor {
    scanner: Scanner,
    pos: usize,
}

impl TokenCursor {
    /// Starts reading `scanner` at its first token.
    #[must_use]
    pub fn new(scanner: Scanner) -> Self {
        Self { scanner, pos: 0 }
    }

    /// Index of the next token to consume.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The underlying scanner.
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Returns the underlying scanner.
    #[must_use]
    pub fn into_inner(self) -> Scanner {
        self.scanner
    }

    /// Starts over on a new input.
    pub fn reset(&mut self, input: impl Into<String>) {
        self.scanner.reset(input);
        self.pos = 0;
    }

    /// Returns the name of the next token, restricted to `types`, without
    /// consuming it.
    ///
    /// Returns `Ok(None)` if no allowed token matches.
    ///
    /// # Errors
    ///
    /// Any [`ScanError`] other than the syntax errors reported as `None`.
    pub fn peek(&mut self, types: &[&str]) -> Result<Option<Arc<str>>, ScanError> {
        match self.scanner.tokenize(self.pos, Some(types)) {
            Ok(token) => Ok(Some(token.name)),
            Err(err) if err.is_syntax_error() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Consumes the next token, which must be named `ty`, and returns its
    /// text.
    ///
    /// # Errors
    ///
    /// [`ScanError::UnexpectedToken`] if the next token has another name, or
    /// any error from [`Scanner::tokenize`].
    pub fn scan(&mut self, ty: &str) -> Result<&str, ScanError> {
        let token = self.scanner.tokenize(self.pos, Some(&[ty]))?;
        if &*token.name != ty {
            return Err(ScanError::UnexpectedToken {
                expected: ty.to_owned(),
                found: token.name.to_string(),
                pos: token.start(),
            });
        }
        self.pos += 1;
        Ok(self.scanner.text(&token))
    }
}
