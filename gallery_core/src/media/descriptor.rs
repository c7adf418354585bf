//! Media descriptor value object

use serde::{Deserialize, Serialize};

use crate::storage::{File, FileId};

/// Detached description of one discovered media file
///
/// Serializes with the keys gallery front-ends expect
/// (`fileid`, `mimetype`, `mtime`, `sharedWithUser`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    /// Path relative to the discovery root, `None` when it could not be built
    pub path: Option<String>,
    #[serde(rename = "fileid")]
    pub file_id: FileId,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    pub mtime: Option<i64>,
    pub etag: String,
    pub size: u64,
    #[serde(rename = "sharedWithUser")]
    pub shared_with_user: bool,
}

impl MediaDescriptor {
    /// Copy the metadata of `file` into a new descriptor
    ///
    /// `mime_type` is passed in already normalized, as checked against the
    /// whitelist.
    pub fn from_file<F: File>(file: &F, path: Option<String>, mime_type: String) -> Self {
        Self {
            path,
            file_id: file.id(),
            mime_type,
            mtime: file.mtime(),
            etag: file.etag().to_string(),
            size: file.size(),
            shared_with_user: file.is_shared_with_user(),
        }
    }
}
