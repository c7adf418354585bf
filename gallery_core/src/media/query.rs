//! Pre-computed discovery request
//!
//! A [`MediaQuery`] folds the caller's MIME whitelist and feature toggles into
//! the few facts the walk needs, so the walk itself carries no feature logic.

use std::collections::BTreeSet;

use super::features::{Feature, FeatureSet};
use super::mime::{self, SVG_MIME_TYPE};
use crate::Result;
use crate::error::ValidationError;

/// Effective whitelist and traversal policy for one discovery request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    media_types: BTreeSet<String>,
    allow_external: bool,
}

impl MediaQuery {
    /// Build a query from the caller's accepted MIME types and features
    ///
    /// Fails when an accepted type is not of the `type/subtype` form.
    pub fn new<I, S>(media_types: I, features: &FeatureSet) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = BTreeSet::new();
        for raw in media_types {
            let mime_type = mime::normalize(raw.as_ref());
            if !mime::is_well_formed(&mime_type) {
                return Err(ValidationError::invalid_parameter(
                    "media_types",
                    &format!("'{}' is not a MIME type", raw.as_ref()),
                )
                .into());
            }
            normalized.insert(mime_type);
        }

        if features.contains(Feature::NativeSvg) {
            normalized.insert(SVG_MIME_TYPE.to_string());
        } else {
            normalized.remove(SVG_MIME_TYPE);
        }

        Ok(Self {
            media_types: normalized,
            allow_external: features.contains(Feature::ExternalShares),
        })
    }

    /// Query over the default media types
    pub fn with_defaults(features: &FeatureSet) -> Result<Self> {
        Self::new(mime::DEFAULT_MEDIA_TYPES, features)
    }

    /// Whether a (normalized) MIME type is on the whitelist
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.media_types.contains(mime_type)
    }

    /// Whether folders on external mounts are walked
    pub fn allows_external(&self) -> bool {
        self.allow_external
    }

    /// The effective whitelist, sorted
    pub fn media_types(&self) -> impl Iterator<Item = &str> {
        self.media_types.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.media_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_query_normalizes_types() {
        let query = MediaQuery::new(["IMAGE/JPEG", "image/png; q=1"], &FeatureSet::new()).unwrap();

        assert!(query.accepts("image/jpeg"));
        assert!(query.accepts("image/png"));
        assert!(!query.accepts("image/gif"));
    }

    #[test]
    fn test_malformed_type_is_rejected() {
        let result = MediaQuery::new(["image/jpeg", "jpeg"], &FeatureSet::new());

        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn test_svg_requires_native_svg() {
        let without = MediaQuery::new(["image/jpeg", SVG_MIME_TYPE], &FeatureSet::new()).unwrap();
        assert!(!without.accepts(SVG_MIME_TYPE));

        let features = FeatureSet::new().with(Feature::NativeSvg);
        let with = MediaQuery::new(["image/jpeg"], &features).unwrap();
        assert!(with.accepts(SVG_MIME_TYPE));
    }

    #[test]
    fn test_external_shares_toggle() {
        let query = MediaQuery::with_defaults(&FeatureSet::new()).unwrap();
        assert!(!query.allows_external());

        let features = FeatureSet::new().with(Feature::ExternalShares);
        let query = MediaQuery::with_defaults(&features).unwrap();
        assert!(query.allows_external());
    }

    #[test]
    fn test_empty_whitelist_is_allowed() {
        let query = MediaQuery::new(Vec::<String>::new(), &FeatureSet::new()).unwrap();
        assert!(query.is_empty());
        assert!(!query.accepts("image/jpeg"));
    }
}
