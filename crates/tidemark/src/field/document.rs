use crate::Result;

use tidemark_core::{err, schema::FieldRecord, validate::Codec, Validator, Value};

/// A structured value stored in serialized form.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Defaults to JSON.
    pub codec: Codec,
}

impl DocumentOptions {
    pub(super) fn record(&self) -> FieldRecord {
        let store = self.codec.clone();
        let retrieve = self.codec.clone();

        FieldRecord::new("BLOB")
            .validator(Validator::Serializable(self.codec.clone()))
            .storage(move |value| serialize(&store, value))
            .retrieval(move |value| deserialize(&retrieve, value))
    }
}

fn serialize(codec: &Codec, value: &Value) -> Result<Value> {
    match codec.serialize(value) {
        Some(text) => Ok(Value::String(text)),
        None => Err(err!("{} codec cannot serialize `{value}`", codec.name())),
    }
}

fn deserialize(codec: &Codec, value: &Value) -> Result<Value> {
    match value {
        Value::String(text) => codec.deserialize(text),
        other => Ok(other.clone()),
    }
}
