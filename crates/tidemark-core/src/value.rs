//! Dynamic values flowing between records, validators and drivers.

/// A single dynamic value.
pub use serde_json::Value;

/// A record's attributes, keyed by field name in insertion order.
pub type Attributes = serde_json::Map<String, Value>;

/// Returns `true` for values the `Require` family treats as missing.
pub fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Renders a value as it appears in a SQL literal or error message.
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
