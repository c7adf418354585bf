//! Error types for the gallery core library
//!
//! Errors are organized into three categories:
//! - Resource errors: identifier lookups that found nothing readable
//! - Validation errors: malformed caller input and configuration
//! - Storage errors: failures reported by a storage adapter
//!
//! Files and folders skipped during a walk are never reported here.

use thiserror::Error;

pub mod resource;
pub mod storage;
pub mod validation;

pub use self::resource::ResourceError;
pub use self::storage::{StorageError, StorageErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the gallery core library
#[derive(Error, Debug)]
pub enum Error {
    /// Identifier did not resolve to a readable entry
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Caller input or configuration was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The storage adapter failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl Error {
    /// Whether this error means "nothing readable behind that identifier"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Resource(ResourceError::NotFound { .. }))
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Storage(StorageError::from_std(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_not_found_error_creation() {
        let error = Error::Resource(ResourceError::not_found(42));

        assert!(error.is_not_found());
        assert!(error.to_string().contains("42"));
    }

    #[test]
    fn test_storage_errors_are_not_not_found() {
        let error = Error::Storage(StorageError::not_found(Path::new("/photos")));

        // Adapter-level absence is a storage failure, not a resolver outcome
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error: Error = io_error.into();

        match error {
            Error::Storage(storage_err) => {
                assert_eq!(storage_err.kind, StorageErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Storage error"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let error = Error::Storage(StorageError::permission_denied(
            Path::new("/photos/private"),
            io_error,
        ));

        assert!(error.source().is_some());
    }

    #[test]
    fn test_validation_error_display() {
        let error = Error::Validation(ValidationError::invalid_parameter(
            "media_types",
            "'jpeg' is not a MIME type",
        ));

        assert!(matches!(
            error,
            Error::Validation(ValidationError::InvalidParameter { .. })
        ));
        assert!(error.to_string().contains("media_types"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(Error::Resource(ResourceError::not_found(1)))
        }

        assert!(returns_error().is_err());
    }
}
