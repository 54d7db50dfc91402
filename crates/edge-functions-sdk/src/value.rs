//! Helpers for inspecting loosely-typed JSON input

use serde_json::Value;

/// Whether a JSON value counts as "nothing supplied".
///
/// Blank values are `null`, `false`, numeric zero, the empty string, the
/// empty array and the empty object.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Render a value for interpolation into text.
///
/// Strings are used verbatim, anything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
