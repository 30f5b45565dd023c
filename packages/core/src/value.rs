//! Loose truthiness and string coercion over [`serde_json::Value`].
//!
//! HAL documents are untyped JSON, so both serializers need a single, shared
//! answer to "is this attribute set?" and "what text does this value render
//! as?". Those answers live here.

use serde::Serialize;
use serde_json::Value;

/// Whether `value` counts as present.
///
/// `null`, `false`, `0` and the empty string are falsy. Every array and
/// object is truthy, including empty ones.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render `value` as plain text.
///
/// Strings are returned verbatim, integral floats lose their fractional part
/// (`30.0` renders as `30`), arrays join their elements with `,` and objects
/// render as compact JSON.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_f64() {
                n.as_f64().map(format_float).unwrap_or_else(|| n.to_string())
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// JSON text indented with `indent` per level.
pub fn to_pretty_string(value: &Value, indent: &str) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

fn format_float(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for v in [json!(true), json!(-1), json!(0.5), json!("x"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(coerce_to_string(&json!(30.0)), "30");
        assert_eq!(coerce_to_string(&json!(-0.0)), "0");
        assert_eq!(coerce_to_string(&json!(2.5)), "2.5");
        assert_eq!(coerce_to_string(&json!(14)), "14");
    }

    #[test]
    fn pretty_string_uses_indent_unit() {
        let text = to_pretty_string(&json!({"a": [1]}), "\t").unwrap();
        assert_eq!(text, "{\n\t\"a\": [\n\t\t1\n\t]\n}");
    }

    #[test]
    fn scalars_and_collections() {
        assert_eq!(coerce_to_string(&json!(true)), "true");
        assert_eq!(coerce_to_string(&json!("USD")), "USD");
        assert_eq!(coerce_to_string(&json!([1, null, "a"])), "1,,a");
        assert_eq!(coerce_to_string(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
