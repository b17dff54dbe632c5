use super::Error;

/// Error when a migration set is declared or invoked incorrectly.
///
/// This occurs when:
/// - A version key has no leading numeric token
/// - Two keys in one set parse to the same version number
/// - A down migration is requested on an irreversible migration
#[derive(Debug)]
pub(super) struct InvalidMigrationError {
    message: Box<str>,
}

impl std::error::Error for InvalidMigrationError {}

impl core::fmt::Display for InvalidMigrationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid migration: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid migration error.
    pub fn invalid_migration(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMigration(InvalidMigrationError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is (or was caused by) an invalid migration error.
    pub fn is_invalid_migration(&self) -> bool {
        self.any(|kind| matches!(kind, super::ErrorKind::InvalidMigration(_)))
    }
}
