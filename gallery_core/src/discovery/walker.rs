//! Depth-first media walk
//!
//! [`MediaWalk`] is an iterator of [`DiscoveryEvent`]s in pre-order. It keeps
//! an explicit stack of folder listings instead of recursing, so arbitrarily
//! deep trees cannot exhaust the call stack. Each walk owns its state; two
//! walks over the same tree share nothing.

use super::events::{DiscoveryEvent, SkipReason};
use super::preview::is_preview_eligible;
use crate::DEFAULT_MARKER_NAME;
use crate::media::{MediaDescriptor, MediaQuery, mime};
use crate::storage::{File, Folder, Node};

/// Children of one entered folder still waiting to be visited
struct Frame<D: Folder> {
    entries: std::vec::IntoIter<Node<D, D::File>>,
    /// Path of the folder relative to the root, `None` once a name is missing
    path: Option<String>,
    depth: usize,
}

/// Streaming walk over a folder tree
pub struct MediaWalk<'a, D: Folder> {
    query: &'a MediaQuery,
    marker: &'a str,
    max_depth: Option<usize>,
    /// Root folder, taken on the first call to `next`
    root: Option<&'a D>,
    stack: Vec<Frame<D>>,
}

impl<'a, D: Folder> MediaWalk<'a, D> {
    /// Create a walk rooted at `root` using the default marker and no depth limit
    pub fn new(root: &'a D, query: &'a MediaQuery) -> Self {
        Self {
            query,
            marker: DEFAULT_MARKER_NAME,
            max_depth: None,
            root: Some(root),
            stack: Vec::new(),
        }
    }

    /// Set the name of the exclusion marker entry
    pub fn with_marker(mut self, marker: &'a str) -> Self {
        self.marker = marker;
        self
    }

    /// Limit how many folder levels below the root are entered
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Consume the walk, keeping only the qualifying files
    pub fn into_media(self) -> Vec<MediaDescriptor> {
        self.filter_map(DiscoveryEvent::into_media).collect()
    }

    /// Check a folder and, if it passes, queue its children
    fn enter(&mut self, folder: &D, path: Option<String>, depth: usize) -> DiscoveryEvent {
        let skipped = |reason| DiscoveryEvent::FolderSkipped {
            path: path.clone(),
            reason,
        };

        if !folder.is_readable() {
            log::debug!("Skipping unreadable folder {}", folder.id());
            return skipped(SkipReason::Unreadable);
        }

        // The root was picked by the caller, so only descendants are checked
        if depth > 0 && folder.is_external() && !self.query.allows_external() {
            log::debug!(
                "Skipping folder {} on external storage {}",
                folder.id(),
                folder.storage_id()
            );
            return skipped(SkipReason::ExternalStorage);
        }

        if self.max_depth.is_some_and(|max| depth > max) {
            return skipped(SkipReason::DepthLimit);
        }

        if folder.has_entry(self.marker) {
            log::debug!("Folder {} holds {}, excluding subtree", folder.id(), self.marker);
            return skipped(SkipReason::Marker);
        }

        match folder.children() {
            Ok(children) => {
                self.stack.push(Frame {
                    entries: children.into_iter(),
                    path: path.clone(),
                    depth,
                });
                DiscoveryEvent::FolderEntered { path }
            }
            Err(e) => {
                log::warn!("Failed to list folder {}: {e}", folder.id());
                skipped(SkipReason::ListingFailed)
            }
        }
    }

    /// Check a file against readability and the whitelist
    fn inspect_file(&self, file: &D::File, path: Option<String>) -> DiscoveryEvent {
        let skipped = |reason| DiscoveryEvent::FileSkipped {
            path: path.clone(),
            file_id: file.id(),
            reason,
        };

        if !file.is_readable() {
            return skipped(SkipReason::Unreadable);
        }

        let mime_type = match file.mime_type() {
            Ok(mime_type) => mime::normalize(&mime_type),
            Err(e) => {
                log::debug!("Skipping file {} without MIME type: {e}", file.id());
                return skipped(SkipReason::MimeUnavailable);
            }
        };

        if !self.query.accepts(&mime_type) {
            return skipped(SkipReason::UnsupportedType);
        }

        DiscoveryEvent::MediaFound {
            previewable: is_preview_eligible(file),
            descriptor: MediaDescriptor::from_file(file, path, mime_type),
        }
    }
}

impl<D: Folder> Iterator for MediaWalk<'_, D> {
    type Item = DiscoveryEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            return Some(self.enter(root, Some(String::new()), 0));
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(node) = frame.entries.next() else {
                self.stack.pop();
                continue;
            };
            let path = join_path(frame.path.as_deref(), node.name());
            let depth = frame.depth + 1;

            return Some(match node {
                Node::Folder(folder) => self.enter(&folder, path, depth),
                Node::File(file) => self.inspect_file(&file, path),
            });
        }
    }
}

/// Append `name` to a relative folder path
fn join_path(parent: Option<&str>, name: Option<&str>) -> Option<String> {
    match (parent, name) {
        (Some(""), Some(name)) => Some(name.to_string()),
        (Some(parent), Some(name)) => Some(format!("{parent}/{name}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(Some(""), Some("a.jpg")), Some("a.jpg".to_string()));
        assert_eq!(
            join_path(Some("2015/summer"), Some("a.jpg")),
            Some("2015/summer/a.jpg".to_string())
        );
        assert_eq!(join_path(None, Some("a.jpg")), None);
        assert_eq!(join_path(Some("2015"), None), None);
    }
}
