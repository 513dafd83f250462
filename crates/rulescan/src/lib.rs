//! A declarative, rule-driven tokenizing engine.
//!
//! An [`Engine`] compiles an ordered table of [`TokenRule`]s (a regular
//! expression plus an action) and drives a single scan over the input,
//! dispatching each match to its action together with a mutable
//! [`ParseContext`]. The first rule in declaration order that matches at the
//! current offset wins. Failures come back as a [`ParseError`] carrying the
//! line, column and an excerpt of the offending source line.
//!
//! The [`json`] module builds a complete JSON parser on top of the engine as
//! a small push-down automaton.

mod engine;
mod error;
pub mod json;
mod locate;
mod options;
mod scanner;
mod value;


pub use engine::{Action, Engine, ParseContext, Token, TokenRule};
pub use error::{ActionError, ErrorKind, ParseError, RuleError};
pub use json::{JsonContext, JsonParser, parse};
pub use locate::{Location, locate, render_snippet};
pub use options::ParserOptions;
pub use value::{Array, Map, Value};
