//! Storage related error types

use std::path::PathBuf;
use thiserror::Error;

/// Error reported by a storage adapter, with additional context
#[derive(Error, Debug)]
#[error("{}", format_storage_error(self))]
pub struct StorageError {
    /// The kind of storage error
    pub kind: StorageErrorKind,
    /// Path associated with the error (if any)
    pub path: Option<PathBuf>,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of storage error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// Entry does not exist in the backing store
    NotFound,
    /// Backing store refused access
    PermissionDenied,
    /// Generic storage failure
    Other,
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(path: &std::path::Path) -> Self {
        Self {
            kind: StorageErrorKind::NotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: &std::path::Path, source: std::io::Error) -> Self {
        Self {
            kind: StorageErrorKind::PermissionDenied,
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// Create a generic failure with a message and no path
    pub fn other(message: &str) -> Self {
        Self {
            kind: StorageErrorKind::Other,
            path: None,
            source: Some(std::io::Error::other(message.to_string())),
        }
    }

    /// Create a storage error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to the error
    pub fn with_path(mut self, path: &std::path::Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn format_storage_error(error: &StorageError) -> String {
    match (&error.kind, &error.path) {
        (StorageErrorKind::NotFound, Some(path)) => {
            format!("Storage entry not found: {}", path.display())
        }
        (StorageErrorKind::NotFound, None) => "Storage entry not found".to_string(),
        (StorageErrorKind::PermissionDenied, Some(path)) => {
            format!("Permission denied for storage entry: {}", path.display())
        }
        (StorageErrorKind::PermissionDenied, None) => "Permission denied".to_string(),
        (StorageErrorKind::Other, path) => {
            let location = path
                .as_ref()
                .map(|p| format!(" at {}", p.display()))
                .unwrap_or_default();
            match &error.source {
                Some(source) => format!("Storage error{location}: {source}"),
                None => format!("Storage error{location}"),
            }
        }
    }
}
