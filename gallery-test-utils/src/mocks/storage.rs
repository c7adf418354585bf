//! In-memory storage backend for testing

use gallery_core::error::StorageError;
use gallery_core::{File, FileId, Folder, Node, Result, Storage};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Child entry of a [`MockFolder`]
pub type MockNode = Node<MockFolder, MockFile>;

/// Storage id used when none is given
const HOME_STORAGE: &str = "home::user";

/// Mock file handle
#[derive(Debug, Clone)]
pub struct MockFile {
    id: FileId,
    name: Option<String>,
    readable: bool,
    /// `None` makes `mime_type()` fail, like a broken entry
    mime_type: Option<String>,
    size: u64,
    mtime: Option<i64>,
    etag: String,
    shared_with_user: bool,
}

impl MockFile {
    /// Create a readable file with the given type
    pub fn new(id: FileId, mime_type: &str) -> Self {
        Self {
            id,
            name: None,
            readable: true,
            mime_type: Some(mime_type.to_string()),
            size: 1024,
            mtime: None,
            etag: format!("etag-{id}"),
            shared_with_user: false,
        }
    }

    /// Readable JPEG image
    pub fn jpeg(id: FileId) -> Self {
        Self::new(id, "image/jpeg")
    }

    /// File whose MIME type cannot be read
    pub fn broken(id: FileId) -> Self {
        Self {
            mime_type: None,
            ..Self::new(id, "application/octet-stream")
        }
    }

    /// The `.nomedia` marker entry itself
    pub fn nomedia(id: FileId) -> Self {
        Self::new(id, "application/octet-stream").with_name(gallery_core::DEFAULT_MARKER_NAME)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_mtime(mut self, mtime: i64) -> Self {
        self.mtime = Some(mtime);
        self
    }

    pub fn with_etag(mut self, etag: &str) -> Self {
        self.etag = etag.to_string();
        self
    }

    /// Mark the file as received through a share
    pub fn shared(mut self) -> Self {
        self.shared_with_user = true;
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }
}

impl File for MockFile {
    fn id(&self) -> FileId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_readable(&self) -> bool {
        self.readable
    }

    fn mime_type(&self) -> Result<String> {
        self.mime_type
            .clone()
            .ok_or_else(|| StorageError::other(&format!("file {} has no MIME type", self.id)).into())
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

/// Mock folder handle
///
/// Clones share the listing counter, so a test can keep a clone of a nested
/// folder and check afterwards whether the walk listed it.
#[derive(Debug, Clone)]
pub struct MockFolder {
    id: FileId,
    name: Option<String>,
    storage_id: String,
    readable: bool,
    external: bool,
    fail_listing: bool,
    entries: Vec<MockNode>,
    /// Names answered by `has_entry` without appearing in the listing
    markers: Vec<String>,
    listings: Arc<AtomicUsize>,
}

impl MockFolder {
    /// Create an empty, readable folder on the home storage
    pub fn new(id: FileId) -> Self {
        Self {
            id,
            name: None,
            storage_id: HOME_STORAGE.to_string(),
            readable: true,
            external: false,
            fail_listing: false,
            entries: Vec::new(),
            markers: Vec::new(),
            listings: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_storage(mut self, storage_id: &str) -> Self {
        self.storage_id = storage_id.to_string();
        self
    }

    /// Append a file to the listing
    pub fn with_file(mut self, file: MockFile) -> Self {
        self.entries.push(Node::File(file));
        self
    }

    /// Append several files to the listing
    pub fn with_files(mut self, files: impl IntoIterator<Item = MockFile>) -> Self {
        self.entries.extend(files.into_iter().map(Node::File));
        self
    }

    /// Append a subfolder to the listing
    pub fn with_folder(mut self, folder: MockFolder) -> Self {
        self.entries.push(Node::Folder(folder));
        self
    }

    /// Report `name` as present without listing it
    pub fn with_marker(mut self, name: &str) -> Self {
        self.markers.push(name.to_string());
        self
    }

    /// Mount on a remote storage
    pub fn external(mut self, storage_id: &str) -> Self {
        self.external = true;
        self.storage_id = storage_id.to_string();
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Make `children()` fail
    pub fn failing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// How many times this folder (or a clone) has been listed
    pub fn listing_count(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }

    /// Entries in listing order
    pub fn entries(&self) -> &[MockNode] {
        &self.entries
    }
}

impl Folder for MockFolder {
    type File = MockFile;

    fn id(&self) -> FileId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_readable(&self) -> bool {
        self.readable
    }

    fn storage_id(&self) -> &str {
        &self.storage_id
    }

    fn is_external(&self) -> bool {
        self.external
    }

    fn children(&self) -> Result<Vec<MockNode>> {
        self.listings.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(StorageError::other(&format!("folder {} is offline", self.id)).into());
        }
        Ok(self.entries.clone())
    }

    fn has_entry(&self, name: &str) -> bool {
        self.markers.iter().any(|marker| marker == name)
            || self.entries.iter().any(|entry| entry.name() == Some(name))
    }
}

/// Mock storage resolving entries by identifier
#[derive(Debug, Clone, Default)]
pub struct MockStorage {
    nodes: HashMap<FileId, MockNode>,
    offline: bool,
}

impl MockStorage {
    /// Create an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage holding `root` and everything below it
    pub fn from_tree(root: &MockFolder) -> Self {
        let mut storage = Self::new();
        storage.add_tree(root);
        storage
    }

    /// Check if the storage is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_file(&mut self, file: MockFile) {
        self.nodes.insert(file.id, Node::File(file));
    }

    pub fn add_folder(&mut self, folder: MockFolder) {
        self.nodes.insert(folder.id, Node::Folder(folder));
    }

    /// Index `root` and all its descendants
    pub fn add_tree(&mut self, root: &MockFolder) {
        let mut pending = vec![root.clone()];
        while let Some(folder) = pending.pop() {
            for entry in &folder.entries {
                match entry {
                    Node::File(file) => self.add_file(file.clone()),
                    Node::Folder(child) => pending.push(child.clone()),
                }
            }
            self.add_folder(folder);
        }
    }

    /// Make every lookup fail
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }
}

impl Storage for MockStorage {
    type File = MockFile;
    type Folder = MockFolder;

    fn node_by_id(&self, id: FileId) -> Result<Option<MockNode>> {
        if self.offline {
            return Err(StorageError::other("storage is offline").into());
        }
        Ok(self.nodes.get(&id).cloned())
    }
}
