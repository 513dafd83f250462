#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rulescan::{ErrorKind, JsonParser, ParserOptions, Value};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    unicode_whitespace: bool,
    max_depth: Option<u8>,
    text: &'a str,
}

fn same(ours: &Value, theirs: &serde_json::Value) -> bool {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Boolean(a), serde_json::Value::Bool(b)) => a == b,
        (Value::Number(a), serde_json::Value::Number(b)) => b
            .as_f64()
            .is_some_and(|b| a == &b || (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())),
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same(x, y))
        }
        (Value::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len() && b.iter().all(|(k, v)| a.get(k).is_some_and(|x| same(x, v)))
        }
        _ => false,
    }
}

fn check(input: &Input<'_>) {
    let parser = JsonParser::new(ParserOptions {
        allow_unicode_whitespace: input.unicode_whitespace,
        max_depth: input
            .max_depth
            .map_or(ParserOptions::default().max_depth, |d| Some(usize::from(d))),
    });
    let ours = parser.parse(input.text);

    if let Err(err) = &ours {
        // Diagnostics must always render, and never report a bug.
        assert_ne!(err.kind(), ErrorKind::Internal, "{err}");
        assert!(err.offset() <= input.text.len());
        let _ = err.to_string();
    }

    // serde_json is the oracle for strict JSON; its depth limit is one level
    // below our default.
    if input.unicode_whitespace || input.max_depth.is_some() {
        return;
    }
    if let Ok(theirs) = serde_json::from_str::<serde_json::Value>(input.text) {
        match ours {
            Ok(value) => assert!(same(&value, &theirs), "{value} != {theirs}"),
            Err(err) => panic!("rejected valid JSON: {err}"),
        }
    }
}

fuzz_target!(|input: Input<'_>| {
    check(&input);
});
