use super::Error;

/// Error when a unique key is requested on an unsized column type.
///
/// MySQL cannot index `TEXT`/`BLOB` columns without a key prefix length.
#[derive(Debug)]
pub(super) struct InvalidUniqueConstraintError {
    field: Box<str>,
    sql: Box<str>,
}

impl std::error::Error for InvalidUniqueConstraintError {}

impl core::fmt::Display for InvalidUniqueConstraintError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid unique constraint on `{}`: unsized type `{}` requires a key length, e.g. `Unique::Prefix(128)`",
            self.field, self.sql
        )
    }
}

impl Error {
    /// Creates an invalid unique constraint error.
    pub fn invalid_unique_constraint(field: impl Into<String>, sql: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidUniqueConstraint(
            InvalidUniqueConstraintError {
                field: field.into().into(),
                sql: sql.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is (or was caused by) an invalid unique constraint error.
    pub fn is_invalid_unique_constraint(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidUniqueConstraint(_)))
    }
}
