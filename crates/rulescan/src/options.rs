/// Configuration options for the JSON grammar.
///
/// # Examples
///
/// ```rust
/// use rulescan::{JsonParser, ParserOptions, Value};
///
/// let parser = JsonParser::new(ParserOptions {
///     allow_unicode_whitespace: true,
///     ..Default::default()
/// });
/// assert_eq!(parser.parse("\u{3000}null").unwrap(), Value::Null);
/// ```
///
/// # Default
///
/// Strict JSON whitespace and at most
/// [`DEFAULT_MAX_DEPTH`](Self::DEFAULT_MAX_DEPTH) nested containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default only the four whitespace characters defined by the JSON
    /// specification are recognized: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Maximum number of nested arrays and objects.
    ///
    /// Opening a container beyond this depth fails with
    /// `Maximum nesting depth exceeded` at the opening bracket. `Some(0)`
    /// only admits scalar documents.
    ///
    /// `None` lifts the limit. Dropping, comparing and printing a [`Value`]
    /// recurse once per level, so an unbounded parser must only see trusted
    /// input.
    ///
    /// # Default
    ///
    /// `Some(128)`, the same bound `serde_json` applies.
    ///
    /// [`Value`]: crate::Value
    pub max_depth: Option<usize>,
}

impl ParserOptions {
    /// Nesting bound used by [`ParserOptions::default`].
    pub const DEFAULT_MAX_DEPTH: usize = 128;
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
        }
    }
}
