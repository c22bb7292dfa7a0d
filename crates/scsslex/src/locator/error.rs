use thiserror::Error;

/// A construct left open when the locator reached the end of its input.
///
/// These are recoverable: the block carrying the error still holds the
/// trailing content that was pending when the input ran out.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum LocatorError {
    /// A `(` was never matched by a `)`.
    #[error("Missing closing parenthesis somewhere in block")]
    UnterminatedParenthesis,
    /// A quoted string was never closed by its matching quote.
    #[error("Missing closing string somewhere in block")]
    UnterminatedString,
    /// A `{` was never matched by a `}`.
    #[error("Block never closed")]
    UnterminatedBlock,
}
