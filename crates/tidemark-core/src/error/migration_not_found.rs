use super::Error;

/// Error when a requested version matches no declared migration.
#[derive(Debug)]
pub(super) struct MigrationNotFoundError {
    version: Box<str>,
}

impl std::error::Error for MigrationNotFoundError {}

impl core::fmt::Display for MigrationNotFoundError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "migration not found: `{}`", self.version)
    }
}

impl Error {
    /// Creates a migration not found error.
    pub fn migration_not_found(version: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MigrationNotFound(MigrationNotFoundError {
            version: version.into().into(),
        }))
    }

    /// Returns `true` if this error is (or was caused by) a migration not found error.
    pub fn is_migration_not_found(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::MigrationNotFound(_)))
    }
}
