use crate::Result;

use super::invalid_option;

use tidemark_core::{
    schema::{FieldContext, FieldRecord},
    ModelRef, Value,
};
use tidemark_sql::{Key, Serializer};

/// A column referencing a field of another model.
#[derive(Debug, Clone)]
pub struct ForeignOptions {
    pub model: ModelRef,

    /// Referenced field. Defaults to `id`.
    pub field: String,
}

impl ForeignOptions {
    pub fn new(model: ModelRef) -> ForeignOptions {
        ForeignOptions {
            model,
            field: "id".to_string(),
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> ForeignOptions {
        self.field = field.into();
        self
    }

    pub(super) fn record(&self, cx: &FieldContext<'_>) -> Result<FieldRecord> {
        let referenced = cx.fieldspec(&self.model)?;
        let table = self.model.table();

        let Some(target) = referenced.get(&self.field) else {
            return Err(invalid_option(
                cx.name,
                format!("model `{table}` has no field `{}`", self.field),
            ));
        };

        let keysql = Serializer::mysql().serialize_key(&Key::foreign(cx.name, table, &self.field));

        Ok(FieldRecord::new(target.base_type())
            .keysql(keysql)
            .storage(store_reference)
            .depends_on(self.model.clone()))
    }
}

/// Stores a related record as its id.
fn store_reference(value: &Value) -> Result<Value> {
    match value {
        Value::Object(record) => Ok(record
            .get("attributes")
            .and_then(|attributes| attributes.get("id"))
            .cloned()
            .unwrap_or(Value::Null)),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use tidemark_core::{ModelDescriptor, Registry, SchemaErrorKind};

    fn user() -> ModelRef {
        ModelDescriptor::builder("user")
            .field("id", Field::id())
            .field("handle", Field::varchar(32))
            .build()
    }

    #[test]
    fn references_the_id_by_default() {
        let user = user();
        let registry = Registry::new();
        let record = Field::foreign(&user)
            .compile(&FieldContext::new("author", &registry))
            .unwrap();

        assert_eq!(record.sql, "BIGINT");
        assert_eq!(
            record.keysql.as_deref(),
            Some("FOREIGN KEY `user_fkey` (`author`) REFERENCES `user` (`id`)")
        );
        assert!(record.depends_on.as_ref().is_some_and(|m| Arc::ptr_eq(m, &user)));
    }

    #[test]
    fn references_another_field() {
        let registry = Registry::new();
        let record = Field::foreign_with(ForeignOptions::new(user()).field("handle"))
            .compile(&FieldContext::new("author", &registry))
            .unwrap();
        assert_eq!(record.sql, "VARCHAR(32)");
    }

    #[test]
    fn missing_referenced_field() {
        let registry = Registry::new();
        let err = Field::foreign_with(ForeignOptions::new(user()).field("nope"))
            .compile(&FieldContext::new("author", &registry))
            .unwrap_err();
        assert_eq!(err.schema_error_kind(), Some(SchemaErrorKind::InvalidOption));
    }

    #[test]
    fn stores_related_records_by_id() {
        let registry = Registry::new();
        let record = Field::foreign(&user())
            .compile(&FieldContext::new("author", &registry))
            .unwrap();

        let related = json!({ "attributes": { "id": 7, "handle": "ann" } });
        assert_eq!(record.mutators.store(&related).unwrap(), json!(7));
        assert_eq!(record.mutators.store(&json!(9)).unwrap(), json!(9));
        assert_eq!(record.mutators.store(&json!({})).unwrap(), Value::Null);
    }
}
