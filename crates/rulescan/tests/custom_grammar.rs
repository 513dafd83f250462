#![allow(missing_docs)]

//! The engine driving a grammar other than JSON: a tiny s-expression reader.

use rulescan::{ActionError, Engine, ErrorKind, ParseContext, RuleError, Token, TokenRule};

#[derive(Debug, Clone, PartialEq)]
enum Sexp {
    Keyword(String),
    Symbol(String),
    Int(i64),
    List(Vec<Sexp>),
}

/// Open lists with the offset of their `(`; the bottom entry collects the
/// top-level forms.
#[derive(Debug)]
struct Reader {
    stack: Vec<(usize, Vec<Sexp>)>,
}

impl Default for Reader {
    fn default() -> Self {
        Self {
            stack: vec![(0, Vec::new())],
        }
    }
}

impl Reader {
    fn push_atom(&mut self, atom: Sexp) -> Result<(), ActionError> {
        self.stack
            .last_mut()
            .map(|(_, items)| items.push(atom))
            .ok_or_else(|| ActionError::Internal("empty stack".into()))
    }
}

impl ParseContext for Reader {
    type Output = Vec<Sexp>;

    fn finalize(mut self) -> Result<Self::Output, ActionError> {
        if self.stack.len() > 1 {
            let (offset, _) = self.stack.pop().unwrap_or_default();
            return Err(ActionError::Positioned {
                offset,
                message: "unclosed list".into(),
            });
        }
        Ok(self.stack.pop().map(|(_, items)| items).unwrap_or_default())
    }
}

fn reader() -> Engine<Reader> {
    Engine::new(vec![
        TokenRule::new("space", r"\s+", |_: &mut Reader, _: &Token<'_>| Ok(())),
        TokenRule::new("open", r"\(", |r: &mut Reader, tok: &Token<'_>| {
            r.stack.push((tok.start, Vec::new()));
            Ok(())
        }),
        TokenRule::new("close", r"\)", |r: &mut Reader, _: &Token<'_>| {
            if r.stack.len() < 2 {
                return Err(ActionError::Value("unexpected ')'".into()));
            }
            let (_, items) = r.stack.pop().unwrap_or_default();
            r.push_atom(Sexp::List(items))
        }),
        // Declared before `symbol`, so it wins wherever both match.
        TokenRule::new("keyword", "let|define", |r: &mut Reader, tok: &Token<'_>| {
            r.push_atom(Sexp::Keyword(tok.text.into()))
        }),
        TokenRule::new("int", "-?[0-9]+", |r: &mut Reader, tok: &Token<'_>| {
            let n = tok
                .text
                .parse()
                .map_err(|_| ActionError::Positioned {
                    offset: tok.start,
                    message: "integer out of range".into(),
                })?;
            r.push_atom(Sexp::Int(n))
        }),
        TokenRule::new("symbol", "[a-z+*-]+", |r: &mut Reader, tok: &Token<'_>| {
            r.push_atom(Sexp::Symbol(tok.text.into()))
        }),
    ])
    .unwrap()
}

fn sym(s: &str) -> Sexp {
    Sexp::Symbol(s.into())
}

#[test]
fn reads_nested_lists() {
    let forms = reader()
        .parse("(define x (+ 1 -2))\n(x)", Reader::default())
        .unwrap();
    assert_eq!(
        forms,
        vec![
            Sexp::List(vec![
                Sexp::Keyword("define".into()),
                sym("x"),
                Sexp::List(vec![sym("+"), Sexp::Int(1), Sexp::Int(-2)]),
            ]),
            Sexp::List(vec![sym("x")]),
        ]
    );
}

#[test]
fn earlier_rule_wins_even_when_later_rule_matches_more() {
    // `letter` starts with the keyword `let`: first-declared wins, so it
    // splits into a keyword and a symbol instead of one longer symbol.
    let forms = reader().parse("letter", Reader::default()).unwrap();
    assert_eq!(forms, vec![Sexp::Keyword("let".into()), sym("ter")]);
}

#[test]
fn value_errors_point_at_the_token() {
    let err = reader().parse("(a))", Reader::default()).unwrap_err();
    assert_eq!(err.description(), "unexpected ')'");
    assert_eq!(err.offset(), 3);
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn finalize_errors_use_their_own_offset() {
    let err = reader().parse("(a\n  (b c)", Reader::default()).unwrap_err();
    assert_eq!(err.description(), "unclosed list");
    assert_eq!(err.offset(), 0);
    assert_eq!(err.line(), 1);
    assert_eq!(err.to_string(), "unclosed list (line: 1)\n(a\n^");
}

#[test]
fn positioned_action_errors_are_kept() {
    let err = reader()
        .parse("(1 99999999999999999999)", Reader::default())
        .unwrap_err();
    assert_eq!(err.description(), "integer out of range");
    assert_eq!(err.offset(), 3);
}

#[test]
fn unrecognized_input_stops_the_scan() {
    let err = reader().parse("(a #b)", Reader::default()).unwrap_err();
    assert_eq!(err.description(), "Unrecognized token");
    assert_eq!(err.column(), 3);
}

#[test]
fn invalid_patterns_are_reported_with_the_rule_name() {
    let err = Engine::<Reader>::new(vec![TokenRule::new(
        "broken",
        "[a-",
        |_: &mut Reader, _: &Token<'_>| Ok(()),
    )])
    .unwrap_err();
    assert!(matches!(err, RuleError::InvalidPattern { ref name, .. } if name == "broken"));
}
