//! The rule-driven tokenizing engine.
//!
//! An [`Engine`] is built from an ordered table of [`TokenRule`]s. Parsing
//! scans the input once; every match is handed to its rule's action together
//! with the mutable parse context. Rules declared earlier take precedence
//! over later ones at the same offset.
//!
//! # Examples
//!
//! ```rust
//! use rulescan::{ActionError, Engine, ParseContext, TokenRule};
//!
//! #[derive(Default)]
//! struct Sum(i64);
//!
//! impl ParseContext for Sum {
//!     type Output = i64;
//!     fn finalize(self) -> Result<i64, ActionError> {
//!         Ok(self.0)
//!     }
//! }
//!
//! let engine = Engine::new(vec![
//!     TokenRule::new("space", r"\s+", |_: &mut Sum, _| Ok(())),
//!     TokenRule::new("int", r"[0-9]+", |sum: &mut Sum, tok| {
//!         sum.0 += tok.text.parse::<i64>().unwrap_or_default();
//!         Ok(())
//!     }),
//! ])
//! .unwrap();
//!
//! assert_eq!(engine.parse("1 2 39", Sum::default()).unwrap(), 42);
//! assert!(engine.parse("1 x", Sum::default()).is_err());
//! ```

use core::fmt;
use std::collections::HashSet;

use tracing::{debug, instrument, trace};

use crate::{
    error::{ActionError, ErrorKind, ParseError, RuleError},
    locate::locate,
    scanner::{Matcher, Scanner},
};

/// A matched token as seen by an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Name of the rule that matched.
    pub rule: &'a str,
    /// The matched text.
    pub text: &'a str,
    /// Absolute byte offset of the first matched byte.
    pub start: usize,
}

/// The effect of a rule on the parse context.
pub type Action<C> = Box<dyn Fn(&mut C, &Token<'_>) -> Result<(), ActionError> + Send + Sync>;

/// A named (pattern, action) pair.
pub struct TokenRule<C> {
    name: String,
    pattern: String,
    action: Action<C>,
}

impl<C> TokenRule<C> {
    /// Binds `action` to every match of the regular expression `pattern`.
    pub fn new<F>(name: impl Into<String>, pattern: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut C, &Token<'_>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            action: Box::new(action),
        }
    }

    /// The rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl<C> fmt::Debug for TokenRule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// State threaded through a scan, turned into the final result once the
/// input is exhausted.
pub trait ParseContext {
    /// The value a successful parse produces.
    type Output;

    /// Called once after the whole input has been consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the context is not in an accepting state. Errors
    /// without an explicit offset are reported at the end of the input.
    fn finalize(self) -> Result<Self::Output, ActionError>;
}

/// A compiled, immutable rule table.
///
/// The engine holds no per-parse state, so one instance can serve any number
/// of parses, including concurrently from several threads as long as each
/// parse brings its own context.
pub struct Engine<C> {
    rules: Vec<TokenRule<C>>,
    matchers: Vec<Matcher>,
}

impl<C> fmt::Debug for Engine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").field("rules", &self.rules).finish()
    }
}

impl<C> Engine<C> {
    /// Compiles `rules`; their order is their precedence.
    ///
    /// # Errors
    ///
    /// Fails if a pattern does not compile or two rules share a name.
    pub fn new(rules: Vec<TokenRule<C>>) -> Result<Self, RuleError> {
        let mut seen = HashSet::with_capacity(rules.len());
        let mut matchers = Vec::with_capacity(rules.len());
        for rule in &rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(RuleError::DuplicateName(rule.name.clone()));
            }
            matchers.push(Matcher::new(&rule.name, &rule.pattern)?);
        }
        debug!(rules = rules.len(), "compiled rule table");
        Ok(Self { rules, matchers })
    }

    /// Rule names in precedence order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(TokenRule::name)
    }

    /// Runs every token of `content` through its action, starting from
    /// `context`, and returns the context left at the end of the input.
    ///
    /// # Errors
    ///
    /// Fails on the first unrecognized token or the first action error.
    #[instrument(level = "debug", skip_all, fields(len = content.len()))]
    pub fn scan(&self, content: &str, mut context: C) -> Result<C, ParseError> {
        let mut scanner = Scanner::new(&self.matchers, content);
        while let Some(m) = scanner.next_match() {
            let rule = &self.rules[m.rule];
            let token = Token {
                rule: &rule.name,
                text: &content[m.start..m.end],
                start: m.start,
            };
            trace!(rule = token.rule, offset = token.start, "token");
            (rule.action)(&mut context, &token)
                .map_err(|e| enrich(content, e, scanner.current_start()))?;
        }

        if !scanner.is_exhausted() {
            let offset = scanner.position();
            return Err(enrich(
                content,
                ActionError::positioned(offset, "Unrecognized token"),
                None,
            ));
        }
        Ok(context)
    }

    /// Scans `content` and finalizes the resulting context.
    ///
    /// # Errors
    ///
    /// See [`Engine::scan`] and [`ParseContext::finalize`].
    pub fn parse(&self, content: &str, context: C) -> Result<C::Output, ParseError>
    where
        C: ParseContext,
    {
        self.scan(content, context)?
            .finalize()
            .map_err(|e| enrich(content, e, None))
    }
}

/// Positions `err` (explicit offset, else the current match, else the end of
/// input) and attaches line information.
fn enrich(content: &str, err: ActionError, current: Option<usize>) -> ParseError {
    let (kind, offset, description) = match err {
        ActionError::Positioned { offset, message } => (ErrorKind::Syntax, offset, message),
        ActionError::Value(message) => (
            ErrorKind::Syntax,
            current.unwrap_or(content.len()),
            message,
        ),
        ActionError::Internal(message) => (
            ErrorKind::Internal,
            current.unwrap_or(content.len()),
            format!("Internal error: {message}"),
        ),
    };
    let location = locate(content, offset);
    debug!(
        offset,
        line = location.line,
        column = location.column,
        %description,
        "parse failed"
    );
    ParseError::new(kind, description, offset, content, location)
}
