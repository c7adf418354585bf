//! Storage port
//!
//! The discovery service never touches a filesystem. It consumes folders and
//! files through the traits in this module, which adapters implement over a
//! concrete backend (local disk, a mock tree in tests, a remote store).
//!
//! All methods are read-only. Implementations must return children in a
//! stable order, since that order becomes the discovery order.

use crate::Result;

/// Storage-assigned identifier of a file or folder
pub type FileId = u64;

/// A child entry of a folder
#[derive(Debug, Clone)]
pub enum Node<D, F> {
    Folder(D),
    File(F),
}

impl<D: Folder<File = F>, F: File> Node<D, F> {
    /// Identifier of the underlying entry
    pub fn id(&self) -> FileId {
        match self {
            Node::Folder(folder) => folder.id(),
            Node::File(file) => file.id(),
        }
    }

    /// Whether the current user may read the entry
    pub fn is_readable(&self) -> bool {
        match self {
            Node::Folder(folder) => folder.is_readable(),
            Node::File(file) => file.is_readable(),
        }
    }

    /// Entry name, if the backend can provide one
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Folder(folder) => folder.name(),
            Node::File(file) => file.name(),
        }
    }

    /// Return the file, if this entry is one
    pub fn into_file(self) -> Option<F> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }

    /// Return the folder, if this entry is one
    pub fn into_folder(self) -> Option<D> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        }
    }
}

/// A folder handle supplied by the storage backend
pub trait Folder: Sized {
    /// File handle type produced when listing this folder
    type File: File;

    /// Storage-assigned identifier
    fn id(&self) -> FileId;

    /// Folder name, used to build paths relative to a discovery root
    fn name(&self) -> Option<&str>;

    /// Whether the current user may list this folder
    fn is_readable(&self) -> bool;

    /// Identifier of the storage holding this folder (e.g. `home::user`)
    fn storage_id(&self) -> &str;

    /// Whether the folder is backed by an externally mounted storage
    fn is_external(&self) -> bool;

    /// Direct children, in storage order
    fn children(&self) -> Result<Vec<Node<Self, Self::File>>>;

    /// Whether an entry named `name` exists directly inside this folder
    fn has_entry(&self, name: &str) -> bool;
}

/// A file handle supplied by the storage backend
pub trait File {
    /// Storage-assigned identifier
    fn id(&self) -> FileId;

    /// File name, used to build paths relative to a discovery root
    fn name(&self) -> Option<&str>;

    /// Whether the current user may read this file
    fn is_readable(&self) -> bool;

    /// MIME type as reported by the backend. Broken entries may fail here.
    fn mime_type(&self) -> Result<String>;

    /// Size in bytes
    fn size(&self) -> u64;

    /// Modification time in seconds since the epoch
    fn mtime(&self) -> Option<i64>;

    /// Opaque change token
    fn etag(&self) -> &str;

    /// Whether the file reached the current user through a share
    fn is_shared_with_user(&self) -> bool;
}

/// Lookup of entries by identifier
pub trait Storage {
    type File: File;
    type Folder: Folder<File = Self::File>;

    /// Find the entry with the given identifier. `Ok(None)` when absent.
    fn node_by_id(&self, id: FileId) -> Result<Option<Node<Self::Folder, Self::File>>>;
}
