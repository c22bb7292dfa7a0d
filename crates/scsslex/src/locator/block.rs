use std::borrow::Cow;

use super::LocatorError;

/// How a [`Block`] came to be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum BlockStatus {
    /// A complete rule block or a leftover declaration.
    Ok,
    /// The input is exhausted. The block is empty and the locator has reset
    /// itself to the start of its input.
    End,
    /// The input ended inside an open construct. The block holds whatever
    /// content was pending, flushed as if the construct had been closed.
    Error(LocatorError),
}

/// One selector or property plus its optional nested body.
///
/// A block with a body is a rule (`.a { color: red; }`): `selector` is the
/// whitespace-normalized text before the `{`, `body` the text between the
/// braces. A block without a body is a leftover declaration such as
/// `color: red` or `@import "x"`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Block<'src> {
    /// Whether this is a regular block, the end marker or a recovered error.
    pub status: BlockStatus,
    /// The line number of the selector, taken from the most recent line-number
    /// hint seen by the locator. `0` until a hint has been seen.
    pub line_number: usize,
    /// Whitespace-normalized selector or property text.
    pub selector: Cow<'src, str>,
    /// The nested body, if this block is a rule.
    pub body: Option<&'src str>,
}

impl<'src> Block<'src> {
    pub(super) fn new(line_number: usize, selector: Cow<'src, str>, body: Option<&'src str>) -> Self {
        Self {
            status: BlockStatus::Ok,
            line_number,
            selector,
            body,
        }
    }

    pub(super) fn end(line_number: usize) -> Self {
        Self {
            status: BlockStatus::End,
            line_number,
            selector: Cow::Borrowed(""),
            body: None,
        }
    }

    /// Returns `true` for the terminal block of a pass over the input.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.status == BlockStatus::End
    }

    /// Returns the error this block was recovered from, if any.
    #[must_use]
    pub fn error(&self) -> Option<LocatorError> {
        match self.status {
            BlockStatus::Error(err) => Some(err),
            BlockStatus::Ok | BlockStatus::End => None,
        }
    }

    /// Returns `true` if the block carries a nested body.
    #[must_use]
    pub fn is_rule(&self) -> bool {
        self.body.is_some()
    }
}
