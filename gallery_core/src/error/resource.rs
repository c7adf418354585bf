//! Resource lookup error types

use thiserror::Error;

use crate::storage::FileId;

/// Errors raised when resolving a storage entry by identifier
///
/// An entry that exists but cannot be read is reported exactly like a
/// missing one, so callers cannot probe permissions through this error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No readable entry matches the identifier
    #[error("Resource not found: {id}")]
    NotFound { id: FileId },
}

impl ResourceError {
    /// Create a not found error
    pub fn not_found(id: FileId) -> Self {
        Self::NotFound { id }
    }
}
