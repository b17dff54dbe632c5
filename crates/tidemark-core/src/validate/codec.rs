use crate::{Result, Value};

use std::{fmt, sync::Arc};

type SerializeFn = dyn Fn(&Value) -> Option<String> + Send + Sync;
type DeserializeFn = dyn Fn(&str) -> Result<Value> + Send + Sync;

/// Converts structured values to and from their stored text form.
#[derive(Clone)]
pub struct Codec {
    name: Arc<str>,
    serialize: Arc<SerializeFn>,
    deserialize: Arc<DeserializeFn>,
}

impl Codec {
    pub fn new(
        name: impl Into<Arc<str>>,
        serialize: impl Fn(&Value) -> Option<String> + Send + Sync + 'static,
        deserialize: impl Fn(&str) -> Result<Value> + Send + Sync + 'static,
    ) -> Codec {
        Codec {
            name: name.into(),
            serialize: Arc::new(serialize),
            deserialize: Arc::new(deserialize),
        }
    }

    /// The JSON codec, used by document fields unless told otherwise.
    pub fn json() -> Codec {
        Codec::new(
            "json",
            |value| serde_json::to_string(value).ok(),
            |text| Ok(serde_json::from_str(text)?),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serializes `value`; `None` means it cannot be stored.
    pub fn serialize(&self, value: &Value) -> Option<String> {
        (self.serialize)(value)
    }

    pub fn deserialize(&self, text: &str) -> Result<Value> {
        (self.deserialize)(text)
    }
}

impl Default for Codec {
    fn default() -> Codec {
        Codec::json()
    }
}

impl PartialEq for Codec {
    fn eq(&self, other: &Codec) -> bool {
        Arc::ptr_eq(&self.serialize, &other.serialize) || self.name == other.name
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Codec").field(&self.name).finish()
    }
}
