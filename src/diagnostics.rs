//! Human-readable rendering of values and error lists.

use serde_json::Value;

use crate::error::ValidationErrors;

/// Classifies a value for type-mismatch messages.
///
/// Arrays are distinct from objects and `null` is distinct from both; an
/// absent value (a missing object field) reports as `missing`.
pub(crate) fn value_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Renders a value for inclusion in an error message.
///
/// Present values render as compact JSON (so strings keep their quotes and
/// stay distinguishable from numbers); absent values render as `missing`.
pub(crate) fn pretty(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_string(),
        Some(v) => v.to_string(),
    }
}

/// Renders an error list as newline-joined `At [root.<path>] <message>` lines.
///
/// Intended for logs and test assertions.
///
/// # Example
///
/// ```rust
/// use distrust::{error_debug_string, number, object, Validator};
/// use serde_json::json;
///
/// let schema = object().field("age", number());
/// let errors = schema
///     .validate(&json!({"age": "forty"}))
///     .into_result()
///     .unwrap_err();
///
/// assert_eq!(
///     error_debug_string(&errors),
///     "At [root.age] expected number, got string"
/// );
/// ```
pub fn error_debug_string(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|error| {
            let location = if error.path.is_root() {
                "root".to_string()
            } else {
                format!("root.{}", error.path)
            };
            format!("At [{}] {}", location, error.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_keep_null_array_and_object_distinct() {
        assert_eq!(value_kind(None), "missing");
        assert_eq!(value_kind(Some(&Value::Null)), "null");
        assert_eq!(value_kind(Some(&json!([1]))), "array");
        assert_eq!(value_kind(Some(&json!({}))), "object");
        assert_eq!(value_kind(Some(&json!("x"))), "string");
    }

    #[test]
    fn pretty_quotes_strings() {
        assert_eq!(pretty(Some(&json!("abc"))), "\"abc\"");
        assert_eq!(pretty(Some(&json!(42))), "42");
        assert_eq!(pretty(None), "missing");
    }
}
