use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use fancy_regex::{Regex, RegexBuilder};
use tracing::debug;

use super::ScanError;
use crate::PatternOptions;

/// Identifies a pattern by its position in precedence order.
///
/// Ids are only meaningful for the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct PatternId(usize);

impl PatternId {
    /// Precedence rank of the pattern: `0` is tried first.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named pattern source plus its lazily compiled matcher.
#[derive(Debug, Clone)]
pub struct Pattern {
    name: Arc<str>,
    source: Box<str>,
    matcher: OnceLock<Result<Regex, String>>,
}

impl Pattern {
    fn new(name: &str, source: &str) -> Self {
        Self {
            name: Arc::from(name),
            source: Box::from(source),
            matcher: OnceLock::new(),
        }
    }

    /// The name tokens matched by this pattern carry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// The pattern source as registered.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` once a compilation has been attempted.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.matcher.get().is_some()
    }

    fn matcher(&self, options: PatternOptions) -> Result<&Regex, ScanError> {
        let compiled = self.matcher.get_or_init(|| {
            let source = if options.case_insensitive {
                format!("(?i){}", self.source)
            } else {
                self.source.to_string()
            };
            let mut builder = RegexBuilder::new(&source);
            if let Some(limit) = options.size_limit {
                builder.delegate_size_limit(limit);
            }
            if let Some(limit) = options.backtrack_limit {
                builder.backtrack_limit(limit);
            }
            debug!(name = %self.name, source = %self.source, "compiling pattern");
            builder.build().map_err(|err| err.to_string())
        });
        compiled.as_ref().map_err(|message| ScanError::InvalidPattern {
            name: self.name.to_string(),
            message: message.clone(),
        })
    }

    /// Length in bytes of the match starting exactly at `pos`, if any.
    ///
    /// The search runs over the whole input, so assertions such as `\b`,
    /// `^` and look-behind see the text before `pos`. Only a match that
    /// starts at `pos` counts; the leftmost match starts there whenever one
    /// does.
    pub(crate) fn match_len(
        &self,
        input: &str,
        pos: usize,
        options: PatternOptions,
    ) -> Result<Option<usize>, ScanError> {
        if pos > input.len() {
            return Ok(None);
        }
        let regex = self.matcher(options)?;
        let found = regex
            .find_from_pos(input, pos)
            .map_err(|err| ScanError::MatchAborted {
                name: self.name.to_string(),
                pos,
                message: err.to_string(),
            })?;
        Ok(found
            .filter(|m| m.start() == pos)
            .map(|m| m.end() - pos))
    }
}

/// Named patterns in precedence order, shared by every [`Scanner`].
///
/// Registration needs `&mut self`; scanners hold the registry through an
/// [`Arc`], so all registration happens before the first scanner is built
/// and matching never interleaves with it. Each pattern compiles on its first
/// match attempt and keeps the compiled form for the life of the registry.
///
/// Names are unique. Registering a name a second time keeps the first
/// source and the first precedence rank.
///
/// ```
/// use scsslex::PatternRegistry;
///
/// let mut registry = PatternRegistry::new();
/// let num = registry.register("num", "[0-9]+");
/// assert_eq!(registry.register("num", "[0-9a-f]+"), num);
/// assert_eq!(registry.get("num").unwrap().source(), "[0-9]+");
/// ```
///
/// [`Scanner`]: crate::Scanner
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    ids: HashMap<Arc<str>, PatternId>,
    options: PatternOptions,
}

impl PatternRegistry {
    /// Creates an empty registry with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry whose patterns compile with `options`.
    #[must_use]
    pub fn with_options(options: PatternOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// The options patterns are compiled with.
    #[must_use]
    pub fn options(&self) -> PatternOptions {
        self.options
    }

    /// Registers `source` under `name` unless the name is already taken.
    ///
    /// Returns the id of the pattern now registered under `name`, which is
    /// the existing one if there was one.
    pub fn register(&mut self, name: &str, source: &str) -> PatternId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = PatternId(self.patterns.len());
        let pattern = Pattern::new(name, source);
        self.ids.insert(Arc::clone(&pattern.name), id);
        self.patterns.push(pattern);
        debug!(name, source, precedence = id.0, "pattern registered");
        id
    }

    /// Returns the pattern registered under `name`, registering `source`
    /// first if the name is new.
    pub fn lookup_or_create(&mut self, name: &str, source: &str) -> &Pattern {
        let id = self.register(name, source);
        &self.patterns[id.0]
    }

    /// Registers every `(name, source)` pair in order.
    ///
    /// On an empty registry this defines the full precedence order. On a
    /// populated one only new names are appended; existing patterns keep
    /// their source and rank.
    pub fn setup<I, N, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: AsRef<str>,
    {
        for (name, source) in patterns {
            self.register(name.as_ref(), source.as_ref());
        }
    }

    /// Compiles every pattern not yet compiled.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPattern`] for the first pattern, in
    /// precedence order, whose source does not compile.
    pub fn compile_all(&self) -> Result<(), ScanError> {
        self.patterns
            .iter()
            .try_for_each(|pattern| pattern.matcher(self.options).map(drop))
    }

    /// The id of the pattern registered under `name`.
    #[must_use]
    pub fn id(&self, name: &str) -> Option<PatternId> {
        self.ids.get(name).copied()
    }

    /// The pattern registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.id(name).and_then(|id| self.pattern(id))
    }

    /// The pattern with the given id.
    #[must_use]
    pub fn pattern(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id.0)
    }

    /// Iterates over the patterns in precedence order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (PatternId, &Pattern)> {
        self.patterns
            .iter()
            .enumerate()
            .map(|(index, pattern)| (PatternId(index), pattern))
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<N, S> FromIterator<(N, S)> for PatternRegistry
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (N, S)>>(patterns: I) -> Self {
        let mut registry = Self::new();
        registry.setup(patterns);
        registry
    }
}
