//! Storage adapter over the local filesystem
//!
//! Provides [`LocalStorage`] and its folder and file handles. Metadata is
//! read once when a handle is created; readability is probed on demand.

use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crc32fast::Hasher as Crc32Hasher;
use gallery_core::error::StorageError;
use gallery_core::{File, FileId, Folder, Node, Result, Storage};
use walkdir::WalkDir;

use super::extensions::mime_for_path;

/// Child entry of a [`LocalFolder`]
pub type LocalNode = Node<LocalFolder, LocalFile>;

/// Prefix of local storage identifiers, followed by the device number
const STORAGE_ID_PREFIX: &str = "local::";

/// Filesystem tree rooted at a directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    /// Device of the root; folders on other devices are external mounts
    device: u64,
}

impl LocalStorage {
    /// Open the directory at `root`
    pub fn open(root: &Path) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|e| storage_error(e, root))?;
        let metadata = fs::metadata(&root).map_err(|e| storage_error(e, &root))?;

        if !metadata.is_dir() {
            return Err(StorageError::other("not a directory")
                .with_path(&root)
                .into());
        }

        log::debug!("Opened local storage at {}", root.display());
        Ok(Self {
            device: device_of(&metadata),
            root,
        })
    }

    /// Canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder handle for the root directory
    pub fn root_folder(&self) -> Result<LocalFolder> {
        let metadata = fs::metadata(&self.root).map_err(|e| storage_error(e, &self.root))?;
        Ok(LocalFolder::new(self.root.clone(), &metadata, self.device))
    }
}

impl Storage for LocalStorage {
    type File = LocalFile;
    type Folder = LocalFolder;

    fn node_by_id(&self, id: FileId) -> Result<Option<LocalNode>> {
        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("Skipping entry during lookup: {e}");
                    continue;
                }
            };

            // Links are not part of the tree, same as during listing
            if entry.path_is_symlink() {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if file_id(entry.path(), &metadata) == id {
                return load_node(entry.path(), self.device);
            }
        }

        Ok(None)
    }
}

/// Directory handle
#[derive(Debug, Clone)]
pub struct LocalFolder {
    id: FileId,
    path: PathBuf,
    name: Option<String>,
    storage_id: String,
    external: bool,
    root_device: u64,
}

impl LocalFolder {
    fn new(path: PathBuf, metadata: &Metadata, root_device: u64) -> Self {
        let device = device_of(metadata);
        Self {
            id: file_id(&path, metadata),
            name: file_name(&path),
            storage_id: format!("{STORAGE_ID_PREFIX}{device}"),
            external: device != root_device,
            root_device,
            path,
        }
    }

    /// Absolute path of the directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Folder for LocalFolder {
    type File = LocalFile;

    fn id(&self) -> FileId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_readable(&self) -> bool {
        fs::read_dir(&self.path).is_ok()
    }

    fn storage_id(&self) -> &str {
        &self.storage_id
    }

    fn is_external(&self) -> bool {
        self.external
    }

    fn children(&self) -> Result<Vec<LocalNode>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.path)
            .map_err(|e| storage_error(e, &self.path))?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    log::debug!("Skipping entry in {}: {e}", self.path.display());
                    None
                }
            })
            .collect();

        // Listing order from the OS is arbitrary
        paths.sort();

        let mut children = Vec::with_capacity(paths.len());
        for path in &paths {
            match load_node(path, self.root_device) {
                Ok(Some(node)) => children.push(node),
                Ok(None) => log::debug!("Not following symlink {}", path.display()),
                Err(e) => log::debug!("Skipping {}: {e}", path.display()),
            }
        }

        Ok(children)
    }

    fn has_entry(&self, name: &str) -> bool {
        self.path.join(name).exists()
    }
}

/// Regular file handle
#[derive(Debug, Clone)]
pub struct LocalFile {
    id: FileId,
    path: PathBuf,
    name: Option<String>,
    size: u64,
    mtime: Option<i64>,
    etag: String,
    shared_with_user: bool,
}

impl LocalFile {
    fn new(path: PathBuf, metadata: &Metadata) -> Self {
        let id = file_id(&path, metadata);
        let size = metadata.len();
        let modified = metadata
            .modified()
            .ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok());

        Self {
            id,
            name: file_name(&path),
            size,
            mtime: modified.and_then(|since| i64::try_from(since.as_secs()).ok()),
            etag: compute_etag(id, size, modified.map_or(0, |since| since.as_nanos())),
            shared_with_user: is_foreign(metadata),
            path,
        }
    }

    /// Absolute path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl File for LocalFile {
    fn id(&self) -> FileId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_readable(&self) -> bool {
        fs::File::open(&self.path).is_ok()
    }

    fn mime_type(&self) -> Result<String> {
        Ok(mime_for_path(&self.path).to_string())
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn mtime(&self) -> Option<i64> {
        self.mtime
    }

    fn etag(&self) -> &str {
        &self.etag
    }

    fn is_shared_with_user(&self) -> bool {
        self.shared_with_user
    }
}

/// Handle for the entry at `path`; `None` for symbolic links
fn load_node(path: &Path, root_device: u64) -> Result<Option<LocalNode>> {
    let metadata = fs::symlink_metadata(path).map_err(|e| storage_error(e, path))?;
    if metadata.file_type().is_symlink() {
        return Ok(None);
    }

    Ok(Some(if metadata.is_dir() {
        Node::Folder(LocalFolder::new(path.to_path_buf(), &metadata, root_device))
    } else {
        Node::File(LocalFile::new(path.to_path_buf(), &metadata))
    }))
}

fn storage_error(source: std::io::Error, path: &Path) -> gallery_core::Error {
    StorageError::from_std(source).with_path(path).into()
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

/// Change token over identity, size and modification time
fn compute_etag(id: FileId, size: u64, mtime_nanos: u128) -> String {
    let mut hasher = Crc32Hasher::new();
    hasher.update(&id.to_le_bytes());
    hasher.update(&size.to_le_bytes());
    hasher.update(&mtime_nanos.to_le_bytes());
    format!("{:08x}", hasher.finalize())
}

#[cfg(unix)]
fn file_id(_path: &Path, metadata: &Metadata) -> FileId {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn file_id(path: &Path, _metadata: &Metadata) -> FileId {
    let mut hasher = Crc32Hasher::new();
    hasher.update(path.to_string_lossy().as_bytes());
    u64::from(hasher.finalize())
}

#[cfg(unix)]
fn device_of(metadata: &Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.dev()
}

#[cfg(not(unix))]
fn device_of(_metadata: &Metadata) -> u64 {
    0
}

/// Whether the entry belongs to another user
#[cfg(unix)]
fn is_foreign(metadata: &Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    // SAFETY: geteuid has no preconditions and cannot fail
    let euid = unsafe { libc::geteuid() };
    metadata.uid() != euid
}

#[cfg(not(unix))]
fn is_foreign(_metadata: &Metadata) -> bool {
    false
}
