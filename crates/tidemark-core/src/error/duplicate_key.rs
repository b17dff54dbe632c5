use super::Error;

/// Error when an insert collides with an existing primary key.
///
/// Drivers raise this instead of a generic driver error so callers that
/// expect the collision (the version ledger's upsert) can recover from it.
#[derive(Debug)]
pub(super) struct DuplicateKeyError {
    message: Box<str>,
}

impl std::error::Error for DuplicateKeyError {}

impl core::fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "duplicate key: {}", self.message)
    }
}

impl Error {
    /// Creates a duplicate key error.
    pub fn duplicate_key(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::DuplicateKey(DuplicateKeyError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a duplicate key error.
    ///
    /// Only the outermost error is inspected; a duplicate key wrapped in
    /// context is no longer a candidate for recovery.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::DuplicateKey(_))
    }
}
