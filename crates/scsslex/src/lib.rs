//! Two-stage tokenization for a stylesheet preprocessor language.
//!
//! - The [`BlockLocator`] splits source text into rule blocks (a selector
//!   plus the raw body between its braces) and leftover declarations. It is
//!   aware of quoted strings, parentheses, nesting and `#{}` interpolation,
//!   tracks line-number hints embedded by a preprocessor, and recovers from
//!   unterminated constructs at end of input.
//! - The [`Scanner`] turns a piece of text into tokens using a shared,
//!   precedence-ordered [`PatternRegistry`], with ignored patterns,
//!   per-call restriction sets and index-based replay.
//!
//! The two stages never call each other: a grammar built on top locates
//! blocks, then scans their selectors and declarations.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use scsslex::{BlockLocator, PatternRegistry, Scanner};
//!
//! let mut locator = BlockLocator::new(".a { color: red; }");
//! let block = locator.next_block();
//! assert_eq!(block.selector, ".a");
//! assert_eq!(block.body, Some("color: red;"));
//! assert!(locator.next_block().is_end());
//!
//! let registry: PatternRegistry = [
//!     ("prop", "[a-z]+"),
//!     ("colon", ":"),
//!     ("ws", r"\s+"),
//!     ("value", "[a-z]+"),
//!     ("semi", ";"),
//! ]
//! .into_iter()
//! .collect();
//! let mut scanner = Scanner::new(Arc::new(registry), ["ws"], block.body.unwrap());
//! for (index, ty) in ["prop", "colon", "value", "semi"].into_iter().enumerate() {
//!     assert_eq!(&*scanner.tokenize(index, Some(&[ty]))?.name, ty);
//! }
//! # Ok::<(), scsslex::ScanError>(())
//! ```

mod locator;
mod normalize;
mod options;
mod scanner;
mod span;

#[cfg(test)]
mod tests;

pub use locator::{Block, BlockLocator, BlockStatus, Blocks, LocatorError, locate_blocks};
pub use normalize::{SEPARATOR, Stripped, is_blank, strip};
pub use options::{LocatorOptions, PatternOptions};
pub use scanner::{Pattern, PatternId, PatternRegistry, ScanError, Scanner, Token, TokenCursor};
pub use span::Span;
