//! Media types, feature toggles and the descriptors returned by discovery

mod descriptor;
mod features;
pub mod mime;
mod query;

pub use descriptor::MediaDescriptor;
pub use features::{Feature, FeatureSet};
pub use query::MediaQuery;
