use super::Error;

/// What was wrong with a schema declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// The model declares no schema at all.
    MissingSchema,

    /// The schema declaration is not a key-value mapping.
    InvalidSchemaType,

    /// A single field declaration is missing or has an unusable shape.
    InvalidFieldDeclaration,

    /// Models depend on each other in a cycle.
    DependencyCycle,

    /// A field helper was given options it cannot honor.
    InvalidOption,
}

impl core::fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            SchemaErrorKind::MissingSchema => "missing schema",
            SchemaErrorKind::InvalidSchemaType => "schema must be a key-value mapping",
            SchemaErrorKind::InvalidFieldDeclaration => "invalid field declaration",
            SchemaErrorKind::DependencyCycle => "dependency cycle between models",
            SchemaErrorKind::InvalidOption => "invalid field option",
        })
    }
}

/// Error when a schema definition is invalid.
///
/// These errors are raised while compiling a model's schema, before any
/// statement reaches the database.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    kind: SchemaErrorKind,
    message: Box<str>,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(kind: SchemaErrorKind, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchemaError {
            kind,
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is (or was caused by) an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        self.schema_error_kind().is_some()
    }

    /// The schema error kind, if this error is (or was caused by) an invalid schema error.
    pub fn schema_error_kind(&self) -> Option<SchemaErrorKind> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::InvalidSchema(err) => Some(err.kind),
            _ => None,
        })
    }
}
