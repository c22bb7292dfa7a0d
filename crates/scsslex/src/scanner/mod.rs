//! Pattern scanner: precedence-ordered tokenization with replay.
//!
//! A [`Scanner`] owns one input and a cursor into it. Each call to
//! [`Scanner::tokenize`] either replays a token already in the history or
//! scans the next one:
//!
//! - Patterns are tried in registration order and the first one that matches
//!   at the cursor wins, whatever the length of later matches.
//! - Matches of ignored patterns are consumed silently and the search
//!   restarts after them.
//! - A restriction set limits one call to the named patterns (plus the
//!   ignored ones). The set is remembered with the token so that replays can
//!   be checked against it.
//!
//! ```
//! use std::sync::Arc;
//!
//! use scsslex::{PatternRegistry, Scanner};
//!
//! let registry: PatternRegistry = [("num", "[0-9]+"), ("ws", r"\s+"), ("op", r"[+*]")]
//!     .into_iter()
//!     .collect();
//! let mut scanner = Scanner::new(Arc::new(registry), ["ws"], "1 + 22");
//!
//! let names: Vec<_> = (0..3)
//!     .map(|i| scanner.tokenize(i, None).map(|t| t.name.to_string()))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(names, ["num", "op", "num"]);
//! let token = scanner.tokenize(2, None).unwrap();
//! assert_eq!(scanner.text(&token), "22");
//! ```

mod cursor;
mod error;
mod registry;
mod token;

use core::{cmp::Ordering, fmt};
use std::sync::Arc;

pub use cursor::TokenCursor;
pub use error::ScanError;
pub use registry::{Pattern, PatternId, PatternRegistry};
pub use token::Token;
use tracing::{debug, trace, warn};

use crate::Span;

/// Number of trailing tokens shown by the `Display` impl.
const DISPLAY_TOKENS: usize = 10;

#[derive(Debug, Clone)]
struct Entry {
    token: Token,
    /// The restriction set the token was scanned under; `None` if
    /// unrestricted.
    restrictions: Option<Box<[String]>>,
}

/// The winning pattern at the cursor.
struct Match {
    pattern: PatternId,
    name: Arc<str>,
    len: usize,
}

/// Tokenizes one input against a shared [`PatternRegistry`].
#[derive(Debug, Clone)]
pub struct Scanner {
    registry: Arc<PatternRegistry>,
    ignore: Vec<PatternId>,
    input: String,
    cursor: usize,
    history: Vec<Entry>,
}

impl Scanner {
    /// Creates a scanner over `input`.
    ///
    /// `ignore` names the patterns whose matches are skipped. Names that are
    /// not registered are dropped.
    pub fn new<I, S>(registry: Arc<PatternRegistry>, ignore: I, input: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignore = ignore
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let id = registry.id(name);
                if id.is_none() {
                    warn!(name, "ignored pattern is not registered");
                }
                id
            })
            .collect();
        Self {
            registry,
            ignore,
            input: input.into(),
            cursor: 0,
            history: Vec::new(),
        }
    }

    /// The registry patterns are matched from.
    #[must_use]
    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.registry
    }

    /// The text being tokenized.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset where the next scan starts.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// The tokens produced since the last reset or rewind, in order.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Token> {
        self.history.iter().map(|entry| &entry.token)
    }

    /// The text of a token produced by this scanner.
    #[must_use]
    pub fn text(&self, token: &Token) -> &str {
        token.text(&self.input)
    }

    /// Returns the token at `index`, scanning it if `index` is the length of
    /// the history.
    ///
    /// `restrictions` limits a scan to the named patterns; `None` or an empty
    /// slice allows every pattern. Replaying a stored token with a
    /// restriction set that names a pattern the stored set did not is
    /// refused.
    ///
    /// # Errors
    ///
    /// - [`ScanError::BadToken`] or [`ScanError::RestrictedToken`] if no
    ///   pattern matches at the cursor.
    /// - [`ScanError::UnimplementedRestrictionChange`] if a replay widens the
    ///   restriction set.
    /// - [`ScanError::NoMoreTokens`] if `index` is past the end of the
    ///   history, or the scan produced the same token as the previous one.
    /// - [`ScanError::InvalidPattern`] if a pattern tried on the way fails to
    ///   compile, or [`ScanError::MatchAborted`] if one gives up.
    pub fn tokenize(&mut self, index: usize, restrictions: Option<&[&str]>) -> Result<Token, ScanError> {
        let restrictions = restrictions.filter(|names| !names.is_empty());
        match index.cmp(&self.history.len()) {
            Ordering::Less => self.replay(index, restrictions),
            Ordering::Equal => {
                if self.scan(restrictions)? {
                    if let Some(entry) = self.history.last() {
                        return Ok(entry.token.clone());
                    }
                }
                Err(ScanError::NoMoreTokens { index })
            }
            Ordering::Greater => Err(ScanError::NoMoreTokens { index }),
        }
    }

    fn replay(&self, index: usize, restrictions: Option<&[&str]>) -> Result<Token, ScanError> {
        let entry = &self.history[index];
        if let (Some(stored), Some(requested)) = (&entry.restrictions, restrictions) {
            let widened = requested
                .iter()
                .any(|name| !stored.iter().any(|s| s == name));
            if widened {
                return Err(ScanError::UnimplementedRestrictionChange { index });
            }
        }
        Ok(entry.token.clone())
    }

    /// Scans one token into the history. Returns `false` if the match
    /// duplicates the last token.
    fn scan(&mut self, restrictions: Option<&[&str]>) -> Result<bool, ScanError> {
        let found = loop {
            let Some(found) = self.best_match(restrictions)? else {
                return Err(self.no_match(restrictions));
            };
            if !self.ignore.contains(&found.pattern) {
                break found;
            }
            trace!(pos = self.cursor, len = found.len, "skipping ignored text");
            self.cursor += found.len;
        };

        let span = Span::new(self.cursor, self.cursor + found.len);
        self.cursor = span.end;
        if let Some(last) = self.history.last() {
            if last.token.pattern == found.pattern && last.token.span == span {
                debug!(pos = span.start, "scan made no progress");
                return Ok(false);
            }
        }

        trace!(name = %found.name, start = span.start, end = span.end, "token scanned");
        self.history.push(Entry {
            token: Token {
                pattern: found.pattern,
                name: found.name,
                span,
            },
            restrictions: restrictions.map(|names| names.iter().map(|&name| name.to_owned()).collect()),
        });
        Ok(true)
    }

    /// Finds the first pattern, in precedence order, matching at the cursor.
    fn best_match(&self, restrictions: Option<&[&str]>) -> Result<Option<Match>, ScanError> {
        let options = self.registry.options();
        for (id, pattern) in self.registry.iter() {
            let ignored = self.ignore.contains(&id);
            if let Some(names) = restrictions {
                if !ignored && !names.iter().any(|&name| name == pattern.name()) {
                    continue;
                }
            }
            trace!(name = pattern.name(), pos = self.cursor, "trying pattern");
            match pattern.match_len(&self.input, self.cursor, options)? {
                // An empty ignored match would skip nothing, forever.
                Some(0) if ignored => {}
                Some(len) => {
                    return Ok(Some(Match {
                        pattern: id,
                        name: Arc::clone(pattern.shared_name()),
                        len,
                    }));
                }
                None => {}
            }
        }
        Ok(None)
    }

    fn no_match(&self, restrictions: Option<&[&str]>) -> ScanError {
        let pos = self.cursor;
        match restrictions {
            Some(names) => ScanError::RestrictedToken {
                pos,
                restrictions: names.iter().map(|&name| name.to_owned()).collect(),
            },
            None => ScanError::BadToken { pos },
        }
    }

    /// Truncates the history to `index` tokens and moves the cursor back to
    /// where the token at `index` started, so that it is scanned again.
    ///
    /// Rewinding to `0` moves the cursor to the start of the input. Indices
    /// at or past the end of the history are ignored.
    pub fn rewind(&mut self, index: usize) {
        let Some(entry) = self.history.get(index) else {
            return;
        };
        self.cursor = if index == 0 { 0 } else { entry.token.start() };
        self.history.truncate(index);
        debug!(index, pos = self.cursor, "scanner rewound");
    }

    /// Replaces the input, clearing the history and the cursor.
    ///
    /// The registry and the ignore set are kept.
    pub fn reset(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.history.clear();
        self.cursor = 0;
        debug!(len = self.input.len(), "scanner reset");
    }
}

impl fmt::Display for Scanner {
    /// Lists the last ten tokens as `(@start)  name  =  "text"` lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.history.is_empty() {
            return f.write_str("None");
        }
        let skip = self.history.len().saturating_sub(DISPLAY_TOKENS);
        for entry in &self.history[skip..] {
            let token = &entry.token;
            write!(
                f,
                "\n  (@{})  {}  =  {:?}",
                token.start(),
                token.name,
                self.text(token)
            )?;
        }
        Ok(())
    }
}
