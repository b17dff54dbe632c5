use super::FieldDeclaration;
use crate::{
    validate::{FieldValidators, Validator},
    Value,
};

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Shared handle to a model. Identity (the pointer) keys the compiled
/// schema cache.
pub type ModelRef = Arc<ModelDescriptor>;

/// A model's schema as declared.
#[derive(Debug, Clone)]
pub enum SchemaDeclaration {
    /// Field declarations in column order.
    Fields(IndexMap<String, FieldDeclaration>),

    /// A JSON document mapping field names to raw SQL or record objects.
    Json(Value),
}

/// Immutable description of a model, built once at registration time.
pub struct ModelDescriptor {
    table: String,
    engine: Option<String>,
    version: Option<String>,
    schema: Option<SchemaDeclaration>,
    validators: FieldValidators,
}

#[derive(Debug)]
pub struct ModelBuilder {
    table: String,
    engine: Option<String>,
    version: Option<String>,
    schema: Option<SchemaDeclaration>,
    validators: FieldValidators,
}

impl ModelDescriptor {
    pub fn builder(table: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            table: table.into(),
            engine: None,
            version: None,
            schema: None,
            validators: FieldValidators::new(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Storage engine for this model's table, when it overrides the default.
    pub fn engine(&self) -> Option<&str> {
        self.engine.as_deref()
    }

    /// Version the ledger is seeded with when the table is first created.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn schema(&self) -> Option<&SchemaDeclaration> {
        self.schema.as_ref()
    }

    /// Model-level validators, run after the schema's own.
    pub fn validators(&self) -> &FieldValidators {
        &self.validators
    }
}

impl ModelBuilder {
    /// Declares a field. Fields become columns in declaration order.
    pub fn field(mut self, name: impl Into<String>, declaration: impl Into<FieldDeclaration>) -> Self {
        if !matches!(self.schema, Some(SchemaDeclaration::Fields(_))) {
            self.schema = Some(SchemaDeclaration::Fields(IndexMap::new()));
        }
        if let Some(SchemaDeclaration::Fields(fields)) = &mut self.schema {
            fields.insert(name.into(), declaration.into());
        }
        self
    }

    /// Declares the whole schema as a JSON document, replacing any fields
    /// declared so far.
    pub fn schema_json(mut self, schema: Value) -> Self {
        self.schema = Some(SchemaDeclaration::Json(schema));
        self
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a model-level validator for `field`.
    pub fn validator(mut self, field: impl Into<String>, validator: Validator) -> Self {
        self.validators.entry(field.into()).or_default().push(validator);
        self
    }

    /// Replaces the model-level validators.
    pub fn validators(mut self, validators: FieldValidators) -> Self {
        self.validators = validators;
        self
    }

    pub fn build(self) -> ModelRef {
        Arc::new(ModelDescriptor {
            table: self.table,
            engine: self.engine,
            version: self.version,
            schema: self.schema,
            validators: self.validators,
        })
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("table", &self.table)
            .field("engine", &self.engine)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
