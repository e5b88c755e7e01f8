//! Formatting of fetched values into shell assignments.
//!
//! Values are tagged once, when the source payload is decoded, as an
//! [`EnvValue`]. Rendering then follows a fixed policy:
//!
//! | Value | Rendered as |
//! |-------|-------------|
//! | string | JSON-quoted string |
//! | number | bare literal, as JavaScript prints it |
//! | anything else | JSON-quoted string of its JSON serialization |
//!
//! The last rule double-encodes booleans, `null`, objects and arrays
//! (`true` becomes `"true"`, `{"a":1}` becomes `"{\"a\":1}"`). Downstream
//! consumers depend on this output, so it must not change.

use serde_json::{Number, Value};

/// A value ready to be rendered on the right-hand side of `KEY=`.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvValue {
    /// Plain string
    Text(String),
    /// JSON number
    Number(Number),
    /// Any other JSON value (bool, null, object, array)
    Json(Value),
}

impl From<Value> for EnvValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Number(n) => Self::Number(n),
            other => Self::Json(other),
        }
    }
}

impl From<String> for EnvValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for EnvValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Returns the text after the last `/` of a hierarchical path.
///
/// ```
/// use secrets_to_env::format::strip_segment;
///
/// assert_eq!(strip_segment("/app/config/db_host"), "db_host");
/// assert_eq!(strip_segment("novalue"), "novalue");
/// assert_eq!(strip_segment("/app/config/"), "");
/// ```
pub fn strip_segment(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, last)) => last,
        None => path,
    }
}

/// Renders a value for the right-hand side of an assignment.
pub fn escape(value: &EnvValue) -> String {
    match value {
        EnvValue::Text(s) => quote(s),
        EnvValue::Number(n) => match n.as_f64() {
            Some(f) => number_literal(f),
            None => n.to_string(),
        },
        EnvValue::Json(v) => quote(&v.to_string()),
    }
}

/// Formats one output line: `KEY=value` or `export KEY=value`.
///
/// ```
/// use secrets_to_env::format::{format_line, EnvValue};
///
/// assert_eq!(format_line("X", &EnvValue::from("y"), true), r#"export X="y""#);
/// assert_eq!(format_line("X", &EnvValue::Number(5.into()), false), "X=5");
/// ```
pub fn format_line(key: &str, value: &EnvValue, use_export: bool) -> String {
    let prefix = if use_export { "export " } else { "" };
    format!("{}{}={}", prefix, key, escape(value))
}

/// Prints a number the way JavaScript's `Number.prototype.toString` does:
/// whole values below 1e21 without a fraction, `-0` as `0`, and exponents
/// outside `[-7, 21)` as `1.5e+300`.
fn number_literal(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}` gives the shortest round-trip digits, e.g. "1.5e2".
    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.to_string();
    };

    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if n - 1 < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}e{}{}", lead, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, sign, (n - 1).abs())
        }
    };

    if f < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

fn quote(s: &str) -> String {
    // Serializing a str cannot fail.
    serde_json::to_string(s).unwrap_or_default()
}
