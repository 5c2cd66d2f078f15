//! Coercions over record values shared by the predicates and the composer.
//!
//! A field that is missing from the record is `None`; a field set to JSON
//! `null` is `Some(Value::Null)`. The two are distinct for `In`, `Same` and
//! numeric coercion.

use serde_json::Value;

/// The record being validated.
pub type Record = serde_json::Map<String, Value>;

/// Whether a value satisfies `required`.
///
/// Missing, `null`, blank strings, empty arrays and empty objects are
/// absent. Every number and boolean is present.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Number(_)) | Some(Value::Bool(_)) => true,
    }
}

/// Text form of a value as used by `in`, `regex` and message placeholders.
///
/// Integral floats drop their fraction (`3.0` -> `"3"`), arrays join their
/// items with `,`.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => format_float(f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Numeric coercion. `None` means "not a number".
///
/// - numbers are themselves, booleans are `0`/`1`, `null` is `0`
/// - strings are trimmed; blank is `0`, otherwise decimal, exponent or
///   `0x`/`0o`/`0b` notation, plus `Infinity`
/// - arrays with zero items are `0`, with one item coerce that item's text
/// - objects and missing values are not numbers
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => parse_number(&stringify(single)),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Parse numeric text with the same rules as [`to_number`] applies to
/// strings.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }

    // Rust accepts "inf" and "nan" spellings that are not numbers here
    let plain = unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !plain {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Length-based size of a non-numeric value: item count of arrays and
/// objects, trimmed character count of everything else. Falsy scalars
/// (`null`, `false`, `0`, `""`) have size `0`.
pub fn length_of(value: Option<&Value>) -> usize {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => 0,
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map.len(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => 0,
        Some(other) => stringify(other).trim().chars().count(),
    }
}
