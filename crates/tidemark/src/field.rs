//! Built-in field helpers.
//!
//! Each helper describes a column type plus the validators and mutators that
//! go with it. Helpers are plain values: every time one is compiled it
//! builds a fresh [`FieldRecord`], so the same helper can be shared between
//! fields and models.
//!
//! ```
//! use tidemark::{Field, ModelDescriptor, Unique};
//!
//! let user = ModelDescriptor::builder("user")
//!     .field("id", Field::id())
//!     .field("email", Field::varchar(255).required().unique(Unique::Key))
//!     .field("bio", Field::text())
//!     .build();
//! # let _ = user;
//! ```

mod document;
pub use document::DocumentOptions;

mod foreign;
pub use foreign::ForeignOptions;

mod number;
pub use number::{IntSize, NumberOptions, NumberType};

mod options;
pub use options::{FieldOptions, Unique};

mod string;
pub use string::{Size, StringOptions, StringType};

mod time;
pub use time::TimeOptions;

use crate::Result;

use tidemark_core::{
    schema::{FieldContext, FieldDeclaration, FieldFactory, FieldRecord},
    validate::TypeCheck,
    Error, ModelRef, SchemaErrorKind, Validator, Value,
};
use tidemark_sql::{Key, Serializer};

use std::sync::Arc;

/// Entry point for the built-in helpers.
#[derive(Debug)]
pub struct Field;

/// A configured helper, ready to be declared on a model.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    kind: Kind,
    options: FieldOptions,
}

#[derive(Debug, Clone)]
enum Kind {
    Id,
    Number(NumberOptions),
    String(StringOptions),
    Enum(Vec<String>),
    Foreign(ForeignOptions),
    Document(DocumentOptions),
    Time(TimeOptions),
}

impl Field {
    /// `BIGINT AUTO_INCREMENT` primary key.
    pub fn id() -> FieldBuilder {
        FieldBuilder::new(Kind::Id)
    }

    pub fn number(options: NumberOptions) -> FieldBuilder {
        FieldBuilder::new(Kind::Number(options))
    }

    pub fn int() -> FieldBuilder {
        Field::number(NumberOptions::default())
    }

    pub fn float() -> FieldBuilder {
        Field::number(NumberOptions::of(NumberType::Float))
    }

    pub fn double() -> FieldBuilder {
        Field::number(NumberOptions::of(NumberType::Double))
    }

    pub fn boolean() -> FieldBuilder {
        Field::number(NumberOptions::of(NumberType::Boolean))
    }

    pub fn string(options: StringOptions) -> FieldBuilder {
        FieldBuilder::new(Kind::String(options))
    }

    pub fn text() -> FieldBuilder {
        Field::string(StringOptions::default())
    }

    pub fn varchar(length: u32) -> FieldBuilder {
        Field::string(StringOptions::sized(StringType::Varchar, length))
    }

    pub fn char(length: u32) -> FieldBuilder {
        Field::string(StringOptions::sized(StringType::Char, length))
    }

    pub fn binary(length: u32) -> FieldBuilder {
        Field::string(StringOptions::sized(StringType::Binary, length))
    }

    pub fn varbinary(length: u32) -> FieldBuilder {
        Field::string(StringOptions::sized(StringType::Varbinary, length))
    }

    pub fn blob() -> FieldBuilder {
        Field::string(StringOptions {
            size: None,
            ty: Some(StringType::Blob),
        })
    }

    /// `ENUM (...)` restricted to `values`.
    pub fn enumeration<I>(values: I) -> FieldBuilder
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        FieldBuilder::new(Kind::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// A reference to `model`'s `id` field.
    pub fn foreign(model: &ModelRef) -> FieldBuilder {
        Field::foreign_with(ForeignOptions::new(model.clone()))
    }

    pub fn foreign_with(options: ForeignOptions) -> FieldBuilder {
        FieldBuilder::new(Kind::Foreign(options))
    }

    /// A structured value stored as a serialized `BLOB`.
    pub fn document(options: DocumentOptions) -> FieldBuilder {
        FieldBuilder::new(Kind::Document(options))
    }

    pub fn time(options: TimeOptions) -> FieldBuilder {
        FieldBuilder::new(Kind::Time(options))
    }

    pub fn timestamp() -> FieldBuilder {
        Field::time(TimeOptions::default())
    }
}

impl FieldBuilder {
    fn new(kind: Kind) -> FieldBuilder {
        FieldBuilder {
            kind,
            options: FieldOptions::default(),
        }
    }

    /// Adds `NOT NULL` and a leading `Require` validator.
    pub fn required(mut self) -> FieldBuilder {
        self.options.required = true;
        self
    }

    /// `null(false)` is the same as [`required`](Self::required).
    pub fn null(mut self, null: bool) -> FieldBuilder {
        self.options.null = Some(null);
        self
    }

    pub fn unique(mut self, unique: Unique) -> FieldBuilder {
        self.options.unique = Some(unique);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> FieldBuilder {
        self.options.default = Some(value.into());
        self
    }

    /// Replaces every option at once.
    pub fn options(mut self, options: FieldOptions) -> FieldBuilder {
        self.options = options;
        self
    }

    /// Builds the record for the field named in `cx`.
    pub fn compile(&self, cx: &FieldContext<'_>) -> Result<FieldRecord> {
        let name = cx.name;

        let (record, ty) = match &self.kind {
            Kind::Id => {
                if self.options.unique.is_some() {
                    return Err(invalid_option(name, "an id is already the primary key"));
                }
                let keysql = Serializer::mysql().serialize_key(&Key::primary(name));
                let record = FieldRecord::new("BIGINT AUTO_INCREMENT")
                    .validator(Validator::Type(TypeCheck::Number))
                    .keysql(keysql);
                (record, "bigint".to_string())
            }
            Kind::Number(options) => {
                let ty = options.ty.to_string();
                let record = options.record();
                let mut record = self.options.finish(record, &ty, name)?;
                // The whole definition is upper-cased, default included
                record.sql = record.sql.to_uppercase();
                return Ok(record);
            }
            Kind::String(options) => {
                let ty = options.ty().to_string();
                (options.record(name)?, ty)
            }
            Kind::Enum(values) => (enum_record(values), "enum".to_string()),
            Kind::Foreign(options) => {
                if self.options.unique.is_some() {
                    return Err(invalid_option(name, "a foreign field already carries a key"));
                }
                let record = options.record(cx)?;
                let ty = record.base_type().to_string();
                (record, ty)
            }
            Kind::Document(options) => (options.record(), "blob".to_string()),
            Kind::Time(options) => (options.record(), options.ty.clone()),
        };

        self.options.finish(record, &ty, name)
    }

    /// A factory compiling this helper for whichever field it is declared on.
    pub fn factory(self) -> FieldFactory {
        let builder = Arc::new(self);
        FieldFactory::new(move |cx| builder.compile(cx))
    }
}

impl From<FieldBuilder> for FieldDeclaration {
    fn from(builder: FieldBuilder) -> FieldDeclaration {
        FieldDeclaration::Factory(builder.factory())
    }
}

fn enum_record(values: &[String]) -> FieldRecord {
    let quoted = values
        .iter()
        .map(|value| options::quote(value))
        .collect::<Vec<_>>()
        .join(", ");

    let allowed = values.iter().cloned().map(Value::from).collect();

    FieldRecord::new(format!("ENUM ({quoted})")).validator(Validator::Type(TypeCheck::Enum(allowed)))
}

pub(crate) fn invalid_option(field: &str, message: impl std::fmt::Display) -> Error {
    Error::invalid_schema(
        SchemaErrorKind::InvalidOption,
        format!("field `{field}`: {message}"),
    )
}
