//! Response envelope inspection.
//!
//! APIs behind `JsonClient` wrap their payload in an object with an optional
//! `"code"` field. A missing or falsy code means success; anything truthy is
//! an application-level failure.

use serde_json::Value;

pub const CODE_FIELD: &str = "code";

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The envelope's code when it signals failure.
pub fn failure_code(envelope: &Value) -> Option<&Value> {
    envelope.get(CODE_FIELD).filter(|code| is_truthy(code))
}

/// Name of the JSON type, for log messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn truthy_values() {
        for value in [json!(true), json!(7), json!(-1), json!(0.5), json!("E1"), json!([0]), json!({"a": 1})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn zero_or_missing_code_is_success() {
        assert!(failure_code(&json!({"code": 0, "value": 1})).is_none());
        assert!(failure_code(&json!({"value": 1})).is_none());
        assert!(failure_code(&json!({"code": null})).is_none());
    }

    #[test]
    fn non_zero_code_is_failure() {
        assert_eq!(failure_code(&json!({"code": 7})), Some(&json!(7)));
        assert_eq!(failure_code(&json!({"code": "E1"})), Some(&json!("E1")));
    }

    #[test]
    fn non_object_has_no_code() {
        assert!(failure_code(&json!([1, 2])).is_none());
        assert_eq!(kind(&json!([1, 2])), "array");
        assert_eq!(kind(&json!("x")), "string");
    }
}
