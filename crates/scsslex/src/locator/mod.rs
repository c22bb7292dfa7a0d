//! Block locator: splits stylesheet source into rule blocks.
//!
//! Overview
//! - The locator walks the source one byte at a time and feeds each
//!   structural byte through the state machine in [`state`]. Quoted strings
//!   and parenthesized expressions suppress structure; `{ }` nesting is
//!   tracked so that only top-level blocks are emitted, with their bodies
//!   left unparsed for a nested locator.
//! - Text outside blocks is emitted as leftover declarations, split on `;`.
//! - Selectors spanning several lines are kept together when the lines are
//!   joined by `,` or when a line break separates two non-blank runs of text;
//!   a line break followed only by blank text is decorative.
//!
//! Cut markers
//! - `init`: start of the pending selector.
//! - `safe`: last confirmed boundary (after a `,` or an opening `(`).
//! - `thin`: tentative boundary after a line break; promoted to `init` only
//!   if non-blank text follows it.
//! - `lose`: start of pending leftover property text.
//!
//! End of input
//! - An unterminated parenthesis, string or block is reported once, on the
//!   block that flushes the pending content as if the construct had been
//!   closed. The following call returns the [`BlockStatus::End`] block and
//!   resets the locator to the start of its input.
//!
//! ```
//! use scsslex::{BlockLocator, BlockStatus};
//!
//! let mut locator = BlockLocator::new("@import 'a';\n.a, .b { color: red; }");
//! let import = locator.next_block();
//! assert_eq!(import.selector, "@import 'a'");
//! assert_eq!(import.body, None);
//!
//! let rule = locator.next_block();
//! assert_eq!(rule.selector, ".a, .b");
//! assert_eq!(rule.body, Some("color: red;"));
//!
//! assert_eq!(locator.next_block().status, BlockStatus::End);
//! ```

mod block;
mod error;
mod state;

use std::borrow::Cow;

pub use block::{Block, BlockStatus};
pub use error::LocatorError;
use state::{Action, CharClass, LocatorState, transition};
use tracing::{debug, trace, warn};

use crate::{
    LocatorOptions,
    normalize::{is_blank, strip},
};

/// Splits source text into a sequence of [`Block`]s.
///
/// The locator borrows its input; blocks borrow from the same input and
/// outlive the locator.
#[derive(Debug, Clone)]
pub struct BlockLocator<'src> {
    source: &'src str,
    options: LocatorOptions,
    state: LocatorState,
}

impl<'src> BlockLocator<'src> {
    /// Creates a locator over `source` with default options.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, LocatorOptions::default())
    }

    /// Creates a locator over `source`.
    #[must_use]
    pub fn with_options(source: &'src str, options: LocatorOptions) -> Self {
        Self {
            source,
            options,
            state: LocatorState::new(),
        }
    }

    /// The text being split.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset of the next byte to examine.
    #[must_use]
    pub fn position(&self) -> usize {
        self.state.cursor
    }

    /// The most recent line number seen in a line-number hint.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.state.line_number
    }

    /// Rewinds to the start of the input, discarding all progress.
    pub fn reset(&mut self) {
        debug!(len = self.source.len(), "block locator reset");
        self.state = LocatorState::new();
    }

    /// Iterates over the remaining blocks, stopping at the end block.
    ///
    /// Blocks recovered from errors are yielded like any other; check
    /// [`Block::error`]. Once the iterator returns `None` the locator has
    /// reset itself and a new pass may begin.
    pub fn blocks(&mut self) -> Blocks<'_, 'src> {
        Blocks {
            locator: self,
            done: false,
        }
    }

    /// Produces the next block.
    ///
    /// Returns a block with [`BlockStatus::End`] once the input is exhausted,
    /// after which the locator starts over from the beginning.
    pub fn next_block(&mut self) -> Block<'src> {
        let source = self.source;
        let bytes = source.as_bytes();
        while self.state.cursor < bytes.len() {
            let pos = self.state.cursor;
            self.state.cursor += 1;
            let byte = bytes[pos];
            if byte == 0 {
                // Line-number hints never carry structure.
                continue;
            }
            if let Some(block) = self.dispatch(CharClass::of(byte), pos) {
                return block;
            }
        }
        self.finish()
    }

    fn dispatch(&mut self, class: CharClass, pos: usize) -> Option<Block<'src>> {
        let action = transition(self.state.mode(), class)?;
        trace!(pos, ?action, "locator transition");

        match action {
            Action::EnterString(quote) => self.state.quote = Some(quote),
            Action::ExitString => self.state.quote = None,
            Action::EnterParen => {
                self.state.paren += 1;
                self.state.thin = None;
                self.state.safe = pos + 1;
            }
            Action::ExitParen => self.state.paren -= 1,
            Action::OpenNested => self.state.depth += 1,
            Action::CloseNested => self.state.depth -= 1,
            Action::MarkSafe => self.mark_safe(pos),
            Action::MarkThin => self.mark_thin(pos),
            Action::OpenBlock => return self.open_block(pos),
            Action::CloseBlock => return self.close_block(pos),
            Action::EndProperty => return self.end_property(pos),
            Action::Flush => return self.flush_properties(),
        }
        None
    }

    fn open_block(&mut self, pos: usize) -> Option<Block<'src>> {
        self.state.depth += 1;
        if pos > 0 && self.source.as_bytes()[pos - 1] == b'#' {
            // `#{...}` is interpolation, not a block.
            self.state.skip = true;
            return None;
        }

        self.state.start = pos;
        if let Some(thin) = self.state.thin {
            if !is_blank(&self.source[thin..pos]) {
                self.state.init = thin;
            }
        }
        let block = self.flush_properties();
        self.state.thin = None;
        block
    }

    fn close_block(&mut self, pos: usize) -> Option<Block<'src>> {
        self.state.depth -= 1;
        if self.state.skip {
            self.state.skip = false;
            return None;
        }

        let source = self.source;
        let LocatorState { init, start, .. } = self.state;
        let stripped = strip(&source[init..start]);
        self.record_line(stripped.line_number);

        let body = &source[start + 1..pos];
        let body = if self.options.raw_bodies { body } else { body.trim() };
        let block = Block::new(self.state.line_number, stripped.text, Some(body));
        debug!(line_number = block.line_number, selector = %block.selector, "rule block located");

        self.state.restart_after(pos, self.source.len());
        Some(block)
    }

    fn end_property(&mut self, pos: usize) -> Option<Block<'src>> {
        self.state.init = pos;
        let block = self.property(self.state.lose, pos);
        self.state.restart_after(pos, self.source.len());
        block
    }

    fn flush_properties(&mut self) -> Option<Block<'src>> {
        let LocatorState { lose, init, .. } = self.state;
        if lose > init {
            return None;
        }
        self.state.lose = init;
        self.property(lose, init)
    }

    fn property(&mut self, from: usize, to: usize) -> Option<Block<'src>> {
        let source = self.source;
        let stripped = strip(&source[from..to]);
        if stripped.is_empty() {
            return None;
        }
        self.record_line(stripped.line_number);
        let block = Block::new(self.state.line_number, stripped.text, None);
        debug!(line_number = block.line_number, property = %block.selector, "declaration located");
        Some(block)
    }

    fn mark_safe(&mut self, pos: usize) {
        if let Some(thin) = self.state.thin {
            if !is_blank(&self.source[thin..pos]) {
                self.state.init = thin;
            }
        }
        self.state.thin = None;
        self.state.safe = pos + 1;
    }

    fn mark_thin(&mut self, pos: usize) {
        match self.state.thin {
            Some(thin) if !is_blank(&self.source[thin..pos]) => {
                self.state.init = thin;
                self.state.thin = Some(pos + 1);
            }
            None if !is_blank(&self.source[self.state.safe..pos]) => {
                self.state.thin = Some(pos + 1);
            }
            _ => {}
        }
    }

    fn record_line(&mut self, line_number: Option<usize>) {
        if let Some(line_number) = line_number {
            self.state.line_number = line_number;
        }
    }

    fn finish(&mut self) -> Block<'src> {
        let len = self.source.len();

        if let Some(error) = self.state.unterminated() {
            warn!(%error, line_number = self.state.line_number, "unterminated construct at end of input");
            // Close everything that is open so that the pending content
            // flushes exactly once.
            self.state.paren = 0;
            self.state.quote = None;
            let mut block = None;
            if self.state.depth > 0 {
                self.state.depth = 1;
                block = self.dispatch(CharClass::CloseBrace, len);
            }
            if block.is_none() {
                self.state.init = len;
                block = self.dispatch(CharClass::End, len);
            }
            let mut block =
                block.unwrap_or_else(|| Block::new(self.state.line_number, Cow::Borrowed(""), None));
            block.status = BlockStatus::Error(error);
            return block;
        }

        if self.state.init < len {
            self.state.init = len;
            if let Some(block) = self.dispatch(CharClass::End, len) {
                return block;
            }
        }

        let line_number = self.state.line_number;
        self.reset();
        Block::end(line_number)
    }
}

/// Iterator over the blocks of one pass, returned by
/// [`BlockLocator::blocks`].
#[derive(Debug)]
pub struct Blocks<'l, 'src> {
    locator: &'l mut BlockLocator<'src>,
    done: bool,
}

impl<'src> Iterator for Blocks<'_, 'src> {
    type Item = Block<'src>;

    fn next(&mut self) -> Option<Block<'src>> {
        if self.done {
            return None;
        }
        let block = self.locator.next_block();
        if block.is_end() {
            self.done = true;
            return None;
        }
        Some(block)
    }
}

/// Collects all blocks of `source` in one pass.
#[must_use]
pub fn locate_blocks(source: &str) -> Vec<Block<'_>> {
    BlockLocator::new(source).blocks().collect()
}
