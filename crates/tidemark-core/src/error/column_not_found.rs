use super::Error;

/// Error when a statement references a column that the live table does not
/// have.
///
/// Raised while rewriting a column rename against the table definition
/// reported by the database.
#[derive(Debug)]
pub(super) struct ColumnNotFoundError {
    table: Box<str>,
    column: Box<str>,
}

impl std::error::Error for ColumnNotFoundError {}

impl core::fmt::Display for ColumnNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "column `{}` not found in table `{}`",
            self.column, self.table
        )
    }
}

impl Error {
    /// Creates a column not found error.
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ColumnNotFound(ColumnNotFoundError {
            table: table.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is (or was caused by) a column not found error.
    pub fn is_column_not_found(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::ColumnNotFound(_)))
    }
}
