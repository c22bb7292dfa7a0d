//! Locator state machine: modes, character classes and transitions.
//!
//! The locator's behaviour for each input byte depends only on the byte's
//! class and on the current [`Mode`] (quote state, parenthesis state and
//! depth bucket). [`transition`] maps that pair to the [`Action`] to run, or
//! to `None` when the byte has no structural effect.

use super::LocatorError;

/// How deeply nested the cursor is in `{ }` blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Depth {
    /// Outside any block.
    Top,
    /// Inside a top-level block.
    Block,
    /// Inside a block nested in a top-level block, at any depth.
    Nested,
}

impl Depth {
    fn of(depth: usize) -> Self {
        match depth {
            0 => Depth::Top,
            1 => Depth::Block,
            _ => Depth::Nested,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Mode {
    /// The quote character of the open string, if any.
    pub quote: Option<u8>,
    pub in_paren: bool,
    pub depth: Depth,
}

/// Structural classes of input bytes. Every other byte is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CharClass {
    Quote(u8),
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comma,
    Newline,
    /// Synthesized once the input is exhausted.
    End,
    Other,
}

impl CharClass {
    pub fn of(byte: u8) -> Self {
        match byte {
            b'"' | b'\'' => CharClass::Quote(byte),
            b'(' => CharClass::OpenParen,
            b')' => CharClass::CloseParen,
            b'{' => CharClass::OpenBrace,
            b'}' => CharClass::CloseBrace,
            b';' => CharClass::Semicolon,
            b',' => CharClass::Comma,
            b'\n' => CharClass::Newline,
            _ => CharClass::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    EnterString(u8),
    ExitString,
    EnterParen,
    ExitParen,
    /// `{` at the top level: a rule block starts (or an interpolation).
    OpenBlock,
    /// `{` inside a block: only the depth changes.
    OpenNested,
    /// `}` closing a top-level block: the block is complete.
    CloseBlock,
    /// `}` closing a nested block: only the depth changes.
    CloseNested,
    EndProperty,
    MarkSafe,
    MarkThin,
    Flush,
}

pub(super) fn transition(mode: Mode, class: CharClass) -> Option<Action> {
    use CharClass as C;

    match (mode.quote, class) {
        (Some(open), C::Quote(quote)) if open == quote => return Some(Action::ExitString),
        (Some(_), _) => return None,
        (None, C::Quote(quote)) => return Some(Action::EnterString(quote)),
        (None, C::OpenParen) => return Some(Action::EnterParen),
        (None, C::CloseParen) if mode.in_paren => return Some(Action::ExitParen),
        (None, _) => {}
    }
    if mode.in_paren {
        return None;
    }

    match (mode.depth, class) {
        (Depth::Top, C::OpenBrace) => Some(Action::OpenBlock),
        (Depth::Block | Depth::Nested, C::OpenBrace) => Some(Action::OpenNested),
        (Depth::Block, C::CloseBrace) => Some(Action::CloseBlock),
        (Depth::Nested, C::CloseBrace) => Some(Action::CloseNested),
        (Depth::Top, C::Semicolon) => Some(Action::EndProperty),
        (Depth::Top, C::Comma) => Some(Action::MarkSafe),
        (Depth::Top, C::Newline) => Some(Action::MarkThin),
        (_, C::End) => Some(Action::Flush),
        _ => None,
    }
}

/// Mutable locator state: cursor, nesting counters and text-cut markers.
///
/// Invariant: `lose <= init <= cursor`; `thin`, when set, lies in
/// `[safe, cursor]`.
#[derive(Debug, Clone, Default)]
pub(super) struct LocatorState {
    pub cursor: usize,
    pub line_number: usize,
    pub depth: usize,
    pub paren: usize,
    pub quote: Option<u8>,
    /// Set while the open top-level `{` is an interpolation (`#{`).
    pub skip: bool,
    /// Start of the pending selector.
    pub init: usize,
    /// Last confirmed boundary.
    pub safe: usize,
    /// Tentative boundary, confirmed only if non-blank text follows it.
    pub thin: Option<usize>,
    /// Start of pending leftover property text.
    pub lose: usize,
    /// Position of the `{` opening the pending top-level block.
    pub start: usize,
}

impl LocatorState {
    pub fn new() -> Self {
        Self {
            thin: Some(0),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        Mode {
            quote: self.quote,
            in_paren: self.paren > 0,
            depth: Depth::of(self.depth),
        }
    }

    /// The construct left open at end of input, by priority.
    pub fn unterminated(&self) -> Option<LocatorError> {
        if self.paren > 0 {
            Some(LocatorError::UnterminatedParenthesis)
        } else if self.quote.is_some() {
            Some(LocatorError::UnterminatedString)
        } else if self.depth > 0 {
            Some(LocatorError::UnterminatedBlock)
        } else {
            None
        }
    }

    /// Moves every marker just past `pos`.
    pub fn restart_after(&mut self, pos: usize, len: usize) {
        let next = (pos + 1).min(len);
        self.init = next;
        self.safe = next;
        self.lose = next;
        self.thin = None;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const TOP: Mode = Mode {
        quote: None,
        in_paren: false,
        depth: Depth::Top,
    };

    #[rstest]
    #[case(b'{', Some(Action::OpenBlock))]
    #[case(b'}', None)]
    #[case(b';', Some(Action::EndProperty))]
    #[case(b',', Some(Action::MarkSafe))]
    #[case(b'\n', Some(Action::MarkThin))]
    #[case(b'(', Some(Action::EnterParen))]
    #[case(b')', None)]
    #[case(b'"', Some(Action::EnterString(b'"')))]
    #[case(b'a', None)]
    fn top_level_transitions(#[case] byte: u8, #[case] expected: Option<Action>) {
        assert_eq!(transition(TOP, CharClass::of(byte)), expected);
    }

    #[rstest]
    #[case(Depth::Block, b'{', Some(Action::OpenNested))]
    #[case(Depth::Block, b'}', Some(Action::CloseBlock))]
    #[case(Depth::Nested, b'}', Some(Action::CloseNested))]
    #[case(Depth::Block, b';', None)]
    #[case(Depth::Block, b',', None)]
    #[case(Depth::Nested, b'\n', None)]
    fn nested_transitions(#[case] depth: Depth, #[case] byte: u8, #[case] expected: Option<Action>) {
        let mode = Mode { depth, ..TOP };
        assert_eq!(transition(mode, CharClass::of(byte)), expected);
    }

    #[test]
    fn strings_only_close_on_matching_quote() {
        let mode = Mode {
            quote: Some(b'\''),
            ..TOP
        };
        assert_eq!(transition(mode, CharClass::of(b'"')), None);
        assert_eq!(transition(mode, CharClass::of(b'{')), None);
        assert_eq!(transition(mode, CharClass::End), None);
        assert_eq!(transition(mode, CharClass::of(b'\'')), Some(Action::ExitString));
    }

    #[test]
    fn parenthesis_suppresses_structure() {
        let mode = Mode { in_paren: true, ..TOP };
        assert_eq!(transition(mode, CharClass::of(b';')), None);
        assert_eq!(transition(mode, CharClass::of(b'{')), None);
        assert_eq!(transition(mode, CharClass::of(b'(')), Some(Action::EnterParen));
        assert_eq!(transition(mode, CharClass::of(b')')), Some(Action::ExitParen));
        assert_eq!(transition(mode, CharClass::of(b'"')), Some(Action::EnterString(b'"')));
    }

    #[test]
    fn end_flushes_at_any_depth() {
        for depth in [Depth::Top, Depth::Block, Depth::Nested] {
            assert_eq!(transition(Mode { depth, ..TOP }, CharClass::End), Some(Action::Flush));
        }
    }
}
