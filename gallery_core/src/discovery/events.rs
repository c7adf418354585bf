//! Events emitted while walking a folder tree

use std::fmt;

use crate::media::MediaDescriptor;
use crate::storage::FileId;

/// Why an entry was left out of the results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The current user may not read the entry
    Unreadable,
    /// The folder holds the exclusion marker
    Marker,
    /// The folder lives on an external mount and external shares are off
    ExternalStorage,
    /// The folder is deeper than the configured limit
    DepthLimit,
    /// The storage failed to list the folder
    ListingFailed,
    /// The file type is not on the whitelist
    UnsupportedType,
    /// The storage could not report the file type
    MimeUnavailable,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Unreadable => "unreadable",
            SkipReason::Marker => "marker",
            SkipReason::ExternalStorage => "external storage",
            SkipReason::DepthLimit => "depth limit",
            SkipReason::ListingFailed => "listing failed",
            SkipReason::UnsupportedType => "unsupported type",
            SkipReason::MimeUnavailable => "mime type unavailable",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a discovery walk, in pre-order
///
/// Paths are relative to the walk root; the root itself is `Some("")`.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryEvent {
    /// A folder passed all checks and its children will follow
    FolderEntered { path: Option<String> },

    /// A folder and everything below it was left out
    FolderSkipped {
        path: Option<String>,
        reason: SkipReason,
    },

    /// A file was left out
    FileSkipped {
        path: Option<String>,
        file_id: FileId,
        reason: SkipReason,
    },

    /// A file qualified
    MediaFound {
        descriptor: MediaDescriptor,
        /// Whether the preview generator can rasterize this file
        previewable: bool,
    },
}

impl DiscoveryEvent {
    /// Relative path of the entry this event is about
    pub fn path(&self) -> Option<&str> {
        match self {
            DiscoveryEvent::FolderEntered { path }
            | DiscoveryEvent::FolderSkipped { path, .. }
            | DiscoveryEvent::FileSkipped { path, .. } => path.as_deref(),
            DiscoveryEvent::MediaFound { descriptor, .. } => descriptor.path.as_deref(),
        }
    }

    /// The descriptor, if this event reports a qualifying file
    pub fn into_media(self) -> Option<MediaDescriptor> {
        match self {
            DiscoveryEvent::MediaFound { descriptor, .. } => Some(descriptor),
            _ => None,
        }
    }

    /// The skip reason, if this event reports an exclusion
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            DiscoveryEvent::FolderSkipped { reason, .. }
            | DiscoveryEvent::FileSkipped { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
