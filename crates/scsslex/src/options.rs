/// Configuration options for the [`BlockLocator`](crate::BlockLocator).
///
/// # Examples
///
/// ```rust
/// use scsslex::{BlockLocator, LocatorOptions};
///
/// let options = LocatorOptions {
///     raw_bodies: true,
///     ..Default::default()
/// };
/// let mut locator = BlockLocator::with_options(".a { b }", options);
/// assert_eq!(locator.next_block().body, Some(" b "));
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Whether block bodies are returned exactly as they appear between the
    /// opening `{` and its matching `}`.
    ///
    /// By default the body has leading and trailing whitespace removed. The
    /// body is never otherwise normalized: nested blocks, comments and
    /// line-number hints inside it are left for a nested locator to handle.
    ///
    /// # Default
    ///
    /// `false`
    pub raw_bodies: bool,
}

/// Options applied when the [`PatternRegistry`](crate::PatternRegistry)
/// compiles pattern sources.
///
/// Compilation is lazy, so these options take effect on the first match
/// attempt against each pattern (or on
/// [`compile_all`](crate::PatternRegistry::compile_all)).
///
/// # Default
///
/// Case-sensitive matching with `fancy-regex`'s default limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternOptions {
    /// Whether patterns match letters case-insensitively.
    ///
    /// # Default
    ///
    /// `false`
    pub case_insensitive: bool,

    /// Upper bound, in bytes, on the size of the compiled automaton of a
    /// pattern (or of each look-around free piece of one).
    ///
    /// `None` keeps the default. A pattern exceeding the limit fails to
    /// compile and is reported as
    /// [`ScanError::InvalidPattern`](crate::ScanError::InvalidPattern).
    ///
    /// # Default
    ///
    /// `None`
    pub size_limit: Option<usize>,

    /// Upper bound on the backtracking steps one match attempt of a pattern
    /// using look-around or backreferences may take.
    ///
    /// An attempt that runs out is reported as
    /// [`ScanError::MatchAborted`](crate::ScanError::MatchAborted).
    ///
    /// # Default
    ///
    /// `None`, which keeps `fancy-regex`'s limit of one million steps.
    pub backtrack_limit: Option<usize>,
}
