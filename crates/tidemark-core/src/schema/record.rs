use super::ModelRef;
use crate::{validate::Validator, Result, Value};

use std::{fmt, sync::Arc};

/// Converts a field value between its in-memory and stored forms.
pub type Mutator = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Directional value conversions for a field. Absent means identity.
#[derive(Clone, Default)]
pub struct Mutators {
    /// Applied before a value is written.
    pub storage: Option<Mutator>,

    /// Applied after a value is read back.
    pub retrieval: Option<Mutator>,
}

/// A compiled field.
#[derive(Clone)]
pub struct FieldRecord {
    /// Column definition, without the column name.
    pub sql: String,

    /// Key clause added alongside the column, if any.
    pub keysql: Option<String>,

    /// Checked in order; the first failure wins.
    pub validators: Vec<Validator>,

    pub mutators: Mutators,

    /// Model whose table must exist before this column is created.
    pub depends_on: Option<ModelRef>,
}

impl FieldRecord {
    pub fn new(sql: impl Into<String>) -> FieldRecord {
        FieldRecord {
            sql: sql.into(),
            keysql: None,
            validators: vec![],
            mutators: Mutators::default(),
            depends_on: None,
        }
    }

    pub fn keysql(mut self, keysql: impl Into<String>) -> FieldRecord {
        self.keysql = Some(keysql.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> FieldRecord {
        self.validators.push(validator);
        self
    }

    pub fn storage(mut self, mutator: impl Fn(&Value) -> Result<Value> + Send + Sync + 'static) -> FieldRecord {
        self.mutators.storage = Some(Arc::new(mutator));
        self
    }

    pub fn retrieval(mut self, mutator: impl Fn(&Value) -> Result<Value> + Send + Sync + 'static) -> FieldRecord {
        self.mutators.retrieval = Some(Arc::new(mutator));
        self
    }

    pub fn depends_on(mut self, model: ModelRef) -> FieldRecord {
        self.depends_on = Some(model);
        self
    }

    /// The SQL base type: the first whitespace-delimited token of `sql`.
    pub fn base_type(&self) -> &str {
        self.sql.split_whitespace().next().unwrap_or("")
    }
}

impl Mutators {
    pub fn store(&self, value: &Value) -> Result<Value> {
        apply(self.storage.as_ref(), value)
    }

    pub fn retrieve(&self, value: &Value) -> Result<Value> {
        apply(self.retrieval.as_ref(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_none() && self.retrieval.is_none()
    }
}

fn apply(mutator: Option<&Mutator>, value: &Value) -> Result<Value> {
    match mutator {
        Some(mutator) => mutator(value),
        None => Ok(value.clone()),
    }
}

impl fmt::Debug for Mutators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutators")
            .field("storage", &self.storage.is_some())
            .field("retrieval", &self.retrieval.is_some())
            .finish()
    }
}

impl fmt::Debug for FieldRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRecord")
            .field("sql", &self.sql)
            .field("keysql", &self.keysql)
            .field("validators", &self.validators)
            .field("mutators", &self.mutators)
            .field("depends_on", &self.depends_on.as_ref().map(|model| model.table()))
            .finish()
    }
}
