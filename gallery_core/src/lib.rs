//! Gallery Core Library
//!
//! Media discovery for photo gallery front-ends: walks a folder tree exposed
//! through the [`storage`] traits and returns detached [`MediaDescriptor`]s
//! for every file the current user may see, plus lookup of single entries by
//! identifier.

pub mod discovery;
pub mod error;
pub mod media;
pub mod storage;

// Mock storage and tree builders live in the gallery-test-utils crate

// Re-export main types
pub use discovery::{DiscoveryEvent, MediaDiscovery, MediaWalk, SkipReason};
pub use error::{Error, Result};
pub use media::{Feature, FeatureSet, MediaDescriptor, MediaQuery};
pub use storage::{File, FileId, Folder, Node, Storage};

use error::ValidationError;

/// Name of the entry that excludes a folder and its subtree from discovery
pub const DEFAULT_MARKER_NAME: &str = ".nomedia";

/// Discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Entry name that excludes a folder from discovery
    pub marker_name: String,
    /// Maximum folder levels below the root to enter (unlimited when unset)
    pub max_depth: Option<usize>,
    /// MIME types offered when a request does not name its own
    pub media_types: Vec<String>,
    /// Features enabled for every request
    pub features: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            marker_name: DEFAULT_MARKER_NAME.to_string(),
            max_depth: None,
            media_types: media::mime::DEFAULT_MEDIA_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            features: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Check the marker name is a plain entry name
    pub fn validate(&self) -> Result<()> {
        let marker = self.marker_name.as_str();
        if marker.is_empty() || marker == "." || marker == ".." {
            return Err(ValidationError::invalid_configuration(
                "marker_name must be a file name",
            )
            .into());
        }
        if marker.contains(['/', '\\']) {
            return Err(ValidationError::invalid_configuration(
                "marker_name must not contain path separators",
            )
            .into());
        }
        Ok(())
    }

    /// Configured features, parsed
    pub fn feature_set(&self) -> FeatureSet {
        FeatureSet::parse(&self.features)
    }

    /// Query over the configured media types and features
    pub fn query(&self) -> Result<MediaQuery> {
        MediaQuery::new(&self.media_types, &self.feature_set())
    }
}
