//! Loose value coercions used by the rule checks.
//!
//! Form values arrive as untyped JSON, so length, pattern and numeric checks
//! first convert the value the same way a browser form would: numbers print
//! without a trailing `.0`, arrays join with `,`, and numeric strings parse
//! after trimming.

use serde_json::{Map, Value};

/// Form data: field name (or nested object) → value.
pub type FormData = Map<String, Value>;

/// `true` when the value is absent, `null` or the empty string.
///
/// Blank values only ever fail a `required` rule; every other check is
/// skipped for them.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// `true` for absent/`null` values, whitespace-only strings, empty arrays and
/// empty objects.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(arr)) => arr.is_empty(),
        Some(Value::Object(obj)) => obj.is_empty(),
        Some(_) => false,
    }
}

/// Truthiness of a value: `false`, `0`, `NaN`, `""` and `null` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Format a number the way form inputs display it (`3` rather than `3.0`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Stringify a value for length and pattern checks.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                format_number(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Coerce a value to a number. `None` stands for `NaN`.
pub fn to_js_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => parse_numeric_str(&to_js_string(single)),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust accepts "inf"/"nan" spellings that a form number does not.
    let lower = trimmed.to_ascii_lowercase();
    if lower.contains("inf") || lower.contains("nan") {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&Value::Null)));
        assert!(is_blank(Some(&json!(""))));
        assert!(!is_blank(Some(&json!(" "))));
        assert!(!is_blank(Some(&json!(0))));
        assert!(!is_blank(Some(&json!(false))));
    }

    #[test]
    fn stringify_like_a_form() {
        assert_eq!(to_js_string(&json!(42)), "42");
        assert_eq!(to_js_string(&json!(3.0)), "3");
        assert_eq!(to_js_string(&json!(1.5)), "1.5");
        assert_eq!(to_js_string(&json!([1, null, "a"])), "1,,a");
        assert_eq!(to_js_string(&json!({"a": 1})), "[object Object]");
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(to_js_number(&json!(" 12 ")), Some(12.0));
        assert_eq!(to_js_number(&json!("")), Some(0.0));
        assert_eq!(to_js_number(&json!("1e3")), Some(1000.0));
        assert_eq!(to_js_number(&json!("abc")), None);
        assert_eq!(to_js_number(&json!("inf")), None);
        assert_eq!(to_js_number(&json!("-Infinity")), Some(f64::NEG_INFINITY));
        assert_eq!(to_js_number(&json!(true)), Some(1.0));
        assert_eq!(to_js_number(&json!(["7"])), Some(7.0));
        assert_eq!(to_js_number(&json!([1, 2])), None);
    }

    #[test]
    fn emptiness() {
        assert!(is_empty(Some(&json!("   "))));
        assert!(is_empty(Some(&json!([]))));
        assert!(is_empty(Some(&json!({}))));
        assert!(!is_empty(Some(&json!(0))));
    }
}
