//! Lookup of single entries by identifier

use crate::Result;
use crate::error::ResourceError;
use crate::storage::{FileId, Node, Storage};

/// Find the readable entry with the given identifier
///
/// Missing and unreadable entries both fail with [`ResourceError::NotFound`].
pub fn resolve_by_id<S: Storage>(storage: &S, id: FileId) -> Result<Node<S::Folder, S::File>> {
    match storage.node_by_id(id)? {
        Some(node) if node.is_readable() => Ok(node),
        Some(_) => {
            log::debug!("Entry {id} exists but is not readable");
            Err(ResourceError::not_found(id).into())
        }
        None => Err(ResourceError::not_found(id).into()),
    }
}

/// Find the readable file with the given identifier
///
/// Folders resolve to [`ResourceError::NotFound`] as well.
pub fn resolve_file<S: Storage>(storage: &S, id: FileId) -> Result<S::File> {
    resolve_by_id(storage, id)?
        .into_file()
        .ok_or_else(|| ResourceError::not_found(id).into())
}
