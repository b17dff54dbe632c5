mod adhoc;
mod column_not_found;
mod driver;
mod duplicate_key;
mod invalid_migration;
mod invalid_schema;
mod invalid_unique_constraint;
mod migration_not_found;
mod validation;

use adhoc::AdhocError;
use column_not_found::ColumnNotFoundError;
use driver::DriverError;
use duplicate_key::DuplicateKeyError;
use invalid_migration::InvalidMigrationError;
use invalid_schema::InvalidSchemaError;
pub use invalid_schema::SchemaErrorKind;
use invalid_unique_constraint::InvalidUniqueConstraintError;
use migration_not_found::MigrationNotFoundError;
use std::fmt;
use std::sync::Arc;
use validation::ValidationError;

/// Returns early with an ad hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Tidemark.
///
/// Errors form a chain: each link carries one kind and, optionally, the
/// error it wraps. The whole chain sits behind a single `Arc`, so cloning
/// and returning an `Error` stays cheap.
#[derive(Clone)]
pub struct Error {
    link: Option<Arc<Link>>,
}

#[derive(Debug)]
struct Link {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Wraps this error with an outer error describing what was being
    /// attempted.
    ///
    /// The outer error is rendered first: `outer: ...: root`.
    #[inline(always)]
    pub fn context(self, outer: impl IntoError) -> Error {
        self.wrap(outer.into_error())
    }

    #[inline(never)]
    #[cold]
    fn wrap(self, outer: Error) -> Error {
        let (kind, cause) = match outer.link.map(Arc::try_unwrap) {
            // An outer chain keeps its links; `self` goes below its root.
            Some(Ok(link)) => match link.cause {
                Some(cause) => (link.kind, self.wrap(cause)),
                None => (link.kind, self),
            },
            // A shared outer error keeps its message but not its kind.
            Some(Err(shared)) => (
                ErrorKind::Adhoc(AdhocError::new(Error { link: Some(shared) }.to_string())),
                self,
            ),
            None => (ErrorKind::Unknown, self),
        };

        Error {
            link: Some(Arc::new(Link {
                kind,
                cause: Some(cause),
            })),
        }
    }

    /// The innermost error of the context chain.
    pub fn root(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    /// Walks from this error down to the root cause.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| {
            err.link.as_deref().and_then(|link| link.cause.as_ref())
        })
    }

    fn kind(&self) -> &ErrorKind {
        match self.link.as_deref() {
            Some(link) => &link.kind,
            None => &ErrorKind::Unknown,
        }
    }

    /// True if this error, or any error in its context chain, matches `f`.
    fn any(&self, f: impl Fn(&ErrorKind) -> bool) -> bool {
        self.chain().any(|err| f(err.kind()))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Driver(err) => Some(err),
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.chain().enumerate() {
            if i > 0 {
                f.write_str(": ")?;
            }
            write!(f, "{}", err.kind())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !f.alternate() {
            return fmt::Display::fmt(self, f);
        }

        match self.link.as_deref() {
            Some(link) => f
                .debug_struct("Error")
                .field("kind", &link.kind)
                .field("cause", &link.cause)
                .finish(),
            None => f.debug_struct("Error").field("kind", &"Unknown").finish(),
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    ColumnNotFound(ColumnNotFoundError),
    Driver(DriverError),
    DuplicateKey(DuplicateKeyError),
    InvalidMigration(InvalidMigrationError),
    InvalidSchema(InvalidSchemaError),
    InvalidUniqueConstraint(InvalidUniqueConstraintError),
    MigrationNotFound(MigrationNotFoundError),
    Validation(ValidationError),
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Anyhow(err) => err.fmt(f),
            ErrorKind::Adhoc(err) => err.fmt(f),
            ErrorKind::ColumnNotFound(err) => err.fmt(f),
            ErrorKind::Driver(err) => err.fmt(f),
            ErrorKind::DuplicateKey(err) => err.fmt(f),
            ErrorKind::InvalidMigration(err) => err.fmt(f),
            ErrorKind::InvalidSchema(err) => err.fmt(f),
            ErrorKind::InvalidUniqueConstraint(err) => err.fmt(f),
            ErrorKind::MigrationNotFound(err) => err.fmt(f),
            ErrorKind::Validation(err) => err.fmt(f),
            ErrorKind::Unknown => f.write_str("unknown tidemark error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            link: Some(Arc::new(Link { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        ErrorKind::Anyhow(err).into()
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Error {
        anyhow::Error::new(err).into()
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        anyhow::Error::new(err).into()
    }
}

/// Values accepted by [`Error::context`].
pub trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_one_pointer_wide() {
        assert_eq!(std::mem::size_of::<Error>(), std::mem::size_of::<usize>());
    }

    #[test]
    fn err_macro_formats() {
        let table = "user";
        assert_eq!(err!("no table `{table}`").to_string(), "no table `user`");
    }

    #[test]
    fn context_renders_outermost_first() {
        let err = err!("connection reset")
            .context(err!("draining 3 steps"))
            .context(err!("migration `0002` (up) failed"));

        assert_eq!(
            err.to_string(),
            "migration `0002` (up) failed: draining 3 steps: connection reset"
        );
        assert_eq!(err.root().to_string(), "connection reset");
    }

    #[test]
    fn chained_context_keeps_its_links() {
        let outer = err!("applying batch").context(err!("run 7"));
        let err = err!("connection reset").context(outer);

        assert_eq!(err.to_string(), "run 7: applying batch: connection reset");
        assert_eq!(err.root().to_string(), "connection reset");
    }

    #[test]
    fn shared_context_keeps_its_message() {
        let outer = err!("applying batch");
        let _held = outer.clone();

        let err = err!("timeout").context(outer);
        assert_eq!(err.to_string(), "applying batch: timeout");
    }

    #[test]
    fn predicates_see_through_context() {
        let err = Error::column_not_found("user", "yams").context(err!("migration `0002` (up) failed"));

        assert!(err.is_column_not_found());
        assert!(!err.is_driver());
        assert!(err.root().is_column_not_found());
        assert_eq!(
            err.to_string(),
            "migration `0002` (up) failed: column `yams` not found in table `user`"
        );
    }

    #[test]
    fn missing_schema() {
        let err = Error::invalid_schema(SchemaErrorKind::MissingSchema, "model `user`");
        assert!(err.is_invalid_schema());
        assert_eq!(err.schema_error_kind(), Some(SchemaErrorKind::MissingSchema));
        assert_eq!(err.to_string(), "invalid schema: missing schema; model `user`");
    }

    #[test]
    fn invalid_unique_constraint() {
        let err = Error::invalid_unique_constraint("name", "TEXT");
        assert!(err.is_invalid_unique_constraint());
        assert_eq!(
            err.to_string(),
            "invalid unique constraint on `name`: unsized type `TEXT` requires a key length, e.g. `Unique::Prefix(128)`"
        );
    }

    #[test]
    fn migration_not_found() {
        let err = Error::migration_not_found("0042");
        assert!(err.is_migration_not_found());
        assert_eq!(err.to_string(), "migration not found: `0042`");
    }

    #[test]
    fn duplicate_key_is_distinct_from_driver() {
        let err = Error::duplicate_key("Duplicate entry 'user' for key 'PRIMARY'");
        assert!(err.is_duplicate_key());
        assert!(!err.is_driver());
    }

    #[test]
    fn driver_error_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err = Error::driver(io);
        assert!(err.is_driver());
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn parse_errors_convert() {
        let err: Error = "12a".parse::<u64>().unwrap_err().into();
        assert_eq!(err.to_string(), "invalid digit found in string");
    }
}
