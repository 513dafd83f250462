//! Decoding of string and number literals.

use crate::error::ActionError;

const BAD_ESCAPE: &str = "Unexpected escape sequence";

/// Decodes a quoted string literal starting at absolute offset `start`.
///
/// `literal` includes the surrounding quotes. Errors point at the backslash
/// of the offending escape.
pub(crate) fn decode_string(literal: &str, start: usize) -> Result<String, ActionError> {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| ActionError::internal("string literal without quotes"))?;
    // Offset of `inner` within the source.
    let base = start + 1;

    let mut out = String::with_capacity(inner.len());
    let mut rest = inner;
    while let Some(idx) = rest.find('\\') {
        out.push_str(&rest[..idx]);
        let escape_at = base + (inner.len() - rest.len()) + idx;
        let after = &rest[idx + 1..];
        let consumed = match after.chars().next() {
            Some('b') => push(&mut out, '\u{8}'),
            Some('f') => push(&mut out, '\u{c}'),
            Some('n') => push(&mut out, '\n'),
            Some('r') => push(&mut out, '\r'),
            Some('t') => push(&mut out, '\t'),
            Some('"') => push(&mut out, '"'),
            Some('/') => push(&mut out, '/'),
            Some('\\') => push(&mut out, '\\'),
            Some('u') => {
                let unit = hex4(&after[1..]).ok_or_else(|| bad_escape(escape_at))?;
                decode_unit(unit, &after[5..], &mut out)
                    .ok_or_else(|| bad_escape(escape_at))?
            }
            _ => return Err(bad_escape(escape_at)),
        };
        rest = &after[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

fn push(out: &mut String, c: char) -> usize {
    out.push(c);
    1
}

fn bad_escape(offset: usize) -> ActionError {
    ActionError::positioned(offset, BAD_ESCAPE)
}

/// Parses exactly four hex digits at the start of `s`.
fn hex4(s: &str) -> Option<u16> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Pushes the character for code unit `unit`, pairing a high surrogate with
/// a `\uXXXX` low surrogate in `tail`. Returns the number of bytes consumed
/// after the backslash.
fn decode_unit(unit: u16, tail: &str, out: &mut String) -> Option<usize> {
    match unit {
        0xD800..=0xDBFF => {
            let low = tail.strip_prefix("\\u").and_then(hex4)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return None;
            }
            let scalar = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            out.push(char::from_u32(scalar)?);
            Some(11)
        }
        0xDC00..=0xDFFF => None,
        _ => {
            out.push(char::from_u32(u32::from(unit))?);
            Some(5)
        }
    }
}

/// Decodes a number literal already validated by the number rule, starting
/// at absolute offset `start`. Values beyond the `f64` range are rejected.
pub(crate) fn decode_number(literal: &str, start: usize) -> Result<f64, ActionError> {
    let n: f64 = literal
        .parse()
        .map_err(|_| ActionError::internal(format!("number rule matched `{literal}`")))?;
    if !n.is_finite() {
        return Err(ActionError::positioned(start, "Number out of range"));
    }
    Ok(n)
}
