//! Caller-supplied feature toggles

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Features that change what a discovery request returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Descend into folders that live on externally mounted storage
    ExternalShares,
    /// Serve SVG files as-is instead of hiding them
    NativeSvg,
}

impl Feature {
    /// Name used in configuration and requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::ExternalShares => "external_shares",
            Feature::NativeSvg => "native_svg",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "external_shares" => Ok(Feature::ExternalShares),
            "native_svg" => Ok(Feature::NativeSvg),
            other => Err(format!("Unknown feature: {other}")),
        }
    }
}

/// Set of enabled features
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSet {
    features: BTreeSet<Feature>,
}

impl FeatureSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse feature names, ignoring the ones this library does not know.
    ///
    /// Front-ends pass their whole feature list, most of which only concern
    /// the UI (background colour, uploads, ...).
    pub fn parse<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut features = BTreeSet::new();
        for name in names {
            match name.as_ref().parse::<Feature>() {
                Ok(feature) => {
                    features.insert(feature);
                }
                Err(_) => log::debug!("Ignoring feature '{}'", name.as_ref()),
            }
        }
        Self { features }
    }

    /// Enable a feature
    pub fn with(mut self, feature: Feature) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.features.iter().copied()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}
