//! Media discovery service
//!
//! Walks a folder tree handed over by a storage adapter and describes the
//! media files the current user may see:
//!
//! - unreadable folders and files are left out silently
//! - a folder holding the marker entry (`.nomedia`) is left out with its subtree
//! - folders on external mounts are left out unless external shares are enabled
//! - files must carry a whitelisted MIME type
//!
//! Single entries are resolved by identifier with the same readability rule.

mod events;
mod preview;
mod resolver;
mod walker;

pub use events::{DiscoveryEvent, SkipReason};
pub use resolver::{resolve_by_id, resolve_file};
pub use walker::MediaWalk;

use crate::media::{MediaDescriptor, MediaQuery};
use crate::storage::{FileId, Node, Storage};
use crate::{DiscoveryConfig, Result};

/// Discovery and resolution over one storage backend
#[derive(Debug, Clone)]
pub struct MediaDiscovery<S> {
    storage: S,
    config: DiscoveryConfig,
}

impl<S: Storage> MediaDiscovery<S> {
    /// Create a service, rejecting an invalid configuration
    pub fn new(storage: S, config: DiscoveryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { storage, config })
    }

    /// Create a service with the default configuration
    pub fn with_defaults(storage: S) -> Self {
        Self {
            storage,
            config: DiscoveryConfig::default(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Start a streaming walk under `root`
    pub fn walk<'a>(
        &'a self,
        root: &'a S::Folder,
        query: &'a MediaQuery,
    ) -> MediaWalk<'a, S::Folder> {
        MediaWalk::new(root, query)
            .with_marker(&self.config.marker_name)
            .with_max_depth(self.config.max_depth)
    }

    /// Describe every qualifying file under `root`, in pre-order
    ///
    /// An unreadable root yields an empty list.
    pub fn discover(&self, root: &S::Folder, query: &MediaQuery) -> Vec<MediaDescriptor> {
        self.walk(root, query).into_media()
    }

    /// Like [`discover`](Self::discover), reporting every walk event to `observer`
    pub fn discover_with<O>(
        &self,
        root: &S::Folder,
        query: &MediaQuery,
        mut observer: O,
    ) -> Vec<MediaDescriptor>
    where
        O: FnMut(&DiscoveryEvent),
    {
        self.walk(root, query)
            .filter_map(|event| {
                observer(&event);
                event.into_media()
            })
            .collect()
    }

    /// See [`resolve_by_id`]
    pub fn resolve_by_id(&self, id: FileId) -> Result<Node<S::Folder, S::File>> {
        resolve_by_id(&self.storage, id)
    }

    /// See [`resolve_file`]
    pub fn resolve_file(&self, id: FileId) -> Result<S::File> {
        resolve_file(&self.storage, id)
    }
}
