use super::Error;
use crate::validate::{Failure, ValidationErrors};

/// Error when a record's attributes fail validation.
#[derive(Debug)]
pub(super) struct ValidationError {
    pub(super) errors: ValidationErrors,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("validation failed")?;
        let mut s = ": ";
        for (field, failure) in self.errors.iter() {
            write!(f, "{s}{field} ({})", failure.rule)?;
            s = ", ";
        }
        Ok(())
    }
}

impl Error {
    /// Creates a validation error from per-field failures.
    pub fn validation(errors: ValidationErrors) -> Error {
        Error::from(super::ErrorKind::Validation(ValidationError { errors }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Validation(_))
    }

    /// The failure recorded for `field`, if this is a validation error.
    pub fn validation_failure(&self, field: &str) -> Option<&Failure> {
        self.validation_errors()?.get(field)
    }

    /// All per-field failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self.kind() {
            super::ErrorKind::Validation(err) => Some(&err.errors),
            _ => None,
        }
    }
}
