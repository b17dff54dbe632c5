use super::{FieldRecord, Fieldspec, ModelDescriptor, ModelRef, Registry};
use crate::{Error, Result, SchemaErrorKind, Value};

use std::{fmt, sync::Arc};

/// What a field factory is told about the field it is building.
pub struct FieldContext<'a> {
    /// Name of the field being compiled.
    pub name: &'a str,

    /// Registry compiling the enclosing model.
    pub registry: &'a Registry,

    /// Models currently being compiled, outermost first.
    pub(super) compiling: &'a [&'a ModelDescriptor],
}

impl<'a> FieldContext<'a> {
    pub fn new(name: &'a str, registry: &'a Registry) -> FieldContext<'a> {
        FieldContext {
            name,
            registry,
            compiling: &[],
        }
    }

    /// Compiles (or fetches) the fieldspec of another model.
    ///
    /// Fails with a dependency cycle when `model` is already being compiled
    /// further up the stack.
    pub fn fieldspec(&self, model: &ModelRef) -> Result<Arc<Fieldspec>> {
        self.registry.resolve(model, self.compiling)
    }
}

type FactoryFn = dyn Fn(&FieldContext<'_>) -> Result<FieldRecord> + Send + Sync;

/// A function building a field record from the field's name.
#[derive(Clone)]
pub struct FieldFactory(Arc<FactoryFn>);

impl FieldFactory {
    pub fn new(f: impl Fn(&FieldContext<'_>) -> Result<FieldRecord> + Send + Sync + 'static) -> FieldFactory {
        FieldFactory(Arc::new(f))
    }

    pub fn call(&self, cx: &FieldContext<'_>) -> Result<FieldRecord> {
        (self.0)(cx)
    }
}

/// A single field as the user declared it.
#[derive(Clone)]
pub enum FieldDeclaration {
    /// Literal column SQL.
    Raw(String),

    /// An already-normalized record.
    Object(FieldRecord),

    /// Called with the field's context.
    Factory(FieldFactory),

    /// Called once to bind options, the resulting factory is then called
    /// with the field's context.
    HigherOrder(Arc<dyn Fn() -> FieldFactory + Send + Sync>),
}

impl FieldDeclaration {
    pub fn higher_order(f: impl Fn() -> FieldFactory + Send + Sync + 'static) -> FieldDeclaration {
        FieldDeclaration::HigherOrder(Arc::new(f))
    }

    /// Compiles the declaration into a fresh record.
    ///
    /// The declaration itself is never modified, so one declaration can be
    /// shared by any number of fields and models.
    pub fn compile(&self, cx: &FieldContext<'_>) -> Result<FieldRecord> {
        match self {
            FieldDeclaration::Raw(sql) => Ok(FieldRecord::new(sql.clone())),
            FieldDeclaration::Object(record) => Ok(record.clone()),
            FieldDeclaration::Factory(factory) => factory.call(cx),
            FieldDeclaration::HigherOrder(f) => f().call(cx),
        }
    }

    /// Parses one field of a JSON schema document.
    ///
    /// Strings are raw SQL; objects must carry a string `sql` and may carry
    /// a string `keysql`.
    pub fn from_json(name: &str, value: &Value) -> Result<FieldDeclaration> {
        match value {
            Value::String(sql) => Ok(FieldDeclaration::Raw(sql.clone())),
            Value::Object(object) => {
                let Some(Value::String(sql)) = object.get("sql") else {
                    return Err(invalid(name, "object declaration requires a string `sql`"));
                };

                let mut record = FieldRecord::new(sql.clone());

                match object.get("keysql") {
                    None | Some(Value::Null) => {}
                    Some(Value::String(keysql)) => record.keysql = Some(keysql.clone()),
                    Some(_) => return Err(invalid(name, "`keysql` must be a string")),
                }

                Ok(FieldDeclaration::Object(record))
            }
            Value::Null => Err(invalid(name, "declaration is missing")),
            other => Err(invalid(
                name,
                format!("unsupported declaration `{other}`"),
            )),
        }
    }
}

fn invalid(name: &str, message: impl fmt::Display) -> Error {
    Error::invalid_schema(
        SchemaErrorKind::InvalidFieldDeclaration,
        format!("field `{name}`: {message}"),
    )
}

impl From<&str> for FieldDeclaration {
    fn from(sql: &str) -> FieldDeclaration {
        FieldDeclaration::Raw(sql.to_string())
    }
}

impl From<String> for FieldDeclaration {
    fn from(sql: String) -> FieldDeclaration {
        FieldDeclaration::Raw(sql)
    }
}

impl From<FieldRecord> for FieldDeclaration {
    fn from(record: FieldRecord) -> FieldDeclaration {
        FieldDeclaration::Object(record)
    }
}

impl From<FieldFactory> for FieldDeclaration {
    fn from(factory: FieldFactory) -> FieldDeclaration {
        FieldDeclaration::Factory(factory)
    }
}

impl fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldDeclaration::Raw(sql) => f.debug_tuple("Raw").field(sql).finish(),
            FieldDeclaration::Object(record) => f.debug_tuple("Object").field(record).finish(),
            FieldDeclaration::Factory(_) => f.write_str("Factory"),
            FieldDeclaration::HigherOrder(_) => f.write_str("HigherOrder"),
        }
    }
}

impl fmt::Debug for FieldFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldFactory")
    }
}
