//! Local filesystem storage for the discovery service
//!
//! This module implements the `gallery_core` storage traits over a directory
//! tree on disk, with MIME types derived from file extensions.

mod extensions;
mod local;

pub use extensions::{DEFAULT_MIME_TYPE, MIME_BY_EXTENSION, mime_for_path};
pub use local::{LocalFile, LocalFolder, LocalNode, LocalStorage};
