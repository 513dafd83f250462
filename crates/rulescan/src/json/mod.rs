//! A JSON grammar expressed as a rule table for the [`Engine`].
//!
//! Terminal rules (strings, numbers, literals) add a decoded value to the
//! active context; bracket rules push and pop nesting levels; punctuation
//! rules drive the active level's state machine.
//!
//! # Examples
//!
//! ```rust
//! use rulescan::parse;
//!
//! let value = parse(r#"{"list": [1, "two", null]}"#).unwrap();
//! assert_eq!(value.to_string(), r#"{"list":[1,"two",null]}"#);
//!
//! let err = parse("[1 2]").unwrap_err();
//! assert_eq!(err.to_string(), "Unexpected number\n[1 2]\n   ^");
//! ```

mod context;
mod decode;

use std::sync::LazyLock;

pub use context::JsonContext;

use crate::{
    engine::{Engine, Token, TokenRule},
    error::{ActionError, ParseError},
    options::ParserOptions,
    value::Value,
};

const JSON_WHITESPACE: &str = r"[ \t\n\r]+";
const UNICODE_WHITESPACE: &str = r"\s+";
const STRING: &str = r#""(?:[^"\\]|\\.)*""#;
const NUMBER: &str = r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?";

fn literal(value: Value) -> impl Fn(&mut JsonContext, &Token<'_>) -> Result<(), ActionError> {
    move |ctx: &mut JsonContext, _: &Token<'_>| ctx.add_value(value.clone())
}

fn rules(options: &ParserOptions) -> Vec<TokenRule<JsonContext>> {
    let whitespace = if options.allow_unicode_whitespace {
        UNICODE_WHITESPACE
    } else {
        JSON_WHITESPACE
    };

    vec![
        TokenRule::new("whitespace", whitespace, |_: &mut JsonContext, _: &Token<'_>| Ok(())),
        TokenRule::new("begin_array", r"\[", |ctx: &mut JsonContext, tok: &Token<'_>| {
            ctx.open_array(tok.start)
        }),
        TokenRule::new("end_array", r"\]", |ctx: &mut JsonContext, _: &Token<'_>| {
            ctx.close_array()
        }),
        TokenRule::new("begin_object", r"\{", |ctx: &mut JsonContext, tok: &Token<'_>| {
            ctx.open_object(tok.start)
        }),
        TokenRule::new("end_object", r"\}", |ctx: &mut JsonContext, _: &Token<'_>| {
            ctx.close_object()
        }),
        TokenRule::new("colon", ":", |ctx: &mut JsonContext, _: &Token<'_>| ctx.colon()),
        TokenRule::new("comma", ",", |ctx: &mut JsonContext, _: &Token<'_>| ctx.comma()),
        TokenRule::new("string", STRING, |ctx: &mut JsonContext, tok: &Token<'_>| {
            let s = decode::decode_string(tok.text, tok.start)?;
            ctx.add_value(Value::String(s))
        }),
        TokenRule::new("number", NUMBER, |ctx: &mut JsonContext, tok: &Token<'_>| {
            let n = decode::decode_number(tok.text, tok.start)?;
            ctx.add_value(Value::Number(n))
        }),
        TokenRule::new("true", "true", literal(Value::Boolean(true))),
        TokenRule::new("false", "false", literal(Value::Boolean(false))),
        TokenRule::new("null", "null", literal(Value::Null)),
    ]
}

/// A reusable JSON parser.
///
/// Building one compiles the grammar; each call to [`JsonParser::parse`]
/// works on a fresh [`JsonContext`], so a single parser can be shared
/// between threads.
#[derive(Debug)]
pub struct JsonParser {
    engine: Engine<JsonContext>,
    options: ParserOptions,
}

impl JsonParser {
    /// Compiles the JSON grammar for `options`.
    ///
    /// # Panics
    ///
    /// Never in practice: the grammar patterns are fixed and valid, which the
    /// test suite checks for every option combination.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        let engine = Engine::new(rules(&options)).expect("JSON grammar is valid");
        Self { engine, options }
    }

    /// The options this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The underlying rule engine.
    #[must_use]
    pub fn engine(&self) -> &Engine<JsonContext> {
        &self.engine
    }

    /// Parses a complete JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first grammar violation.
    pub fn parse(&self, text: &str) -> Result<Value, ParseError> {
        self.engine
            .parse(text, JsonContext::new(self.options.max_depth))
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

static DEFAULT_PARSER: LazyLock<JsonParser> = LazyLock::new(JsonParser::default);

/// Parses a complete JSON document with the default [`ParserOptions`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first grammar violation.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    DEFAULT_PARSER.parse(text)
}
