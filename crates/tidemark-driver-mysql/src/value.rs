use mysql_async::prelude::ToValue;
use tidemark_core::Value as CoreValue;

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts a value read from a result row.
    pub fn from_sql(value: mysql_async::Value) -> CoreValue {
        use mysql_async::Value::*;

        match value {
            NULL => CoreValue::Null,
            Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(s) => CoreValue::String(s),
                Err(err) => CoreValue::Array(
                    err.into_bytes()
                        .into_iter()
                        .map(CoreValue::from)
                        .collect(),
                ),
            },
            Int(i) => CoreValue::from(i),
            UInt(u) => CoreValue::from(u),
            Float(f) => CoreValue::from(f),
            Double(d) => CoreValue::from(d),
            value @ (Date(..) | Time(..)) => CoreValue::String(
                value.as_sql(true).trim_matches('\'').to_string(),
            ),
        }
    }
}

impl ToValue for Value {
    fn to_value(&self) -> mysql_async::Value {
        match &self.0 {
            CoreValue::Null => mysql_async::Value::NULL,
            CoreValue::Bool(value) => value.to_value(),
            CoreValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.to_value()
                } else if let Some(u) = n.as_u64() {
                    u.to_value()
                } else {
                    n.as_f64().unwrap_or_default().to_value()
                }
            }
            CoreValue::String(value) => value.to_value(),
            // Structured values are stored as their JSON text
            value @ (CoreValue::Array(_) | CoreValue::Object(_)) => value.to_string().to_value(),
        }
    }
}
