//! Test utilities for the gallery media discovery service
//!
//! This crate provides an in-memory storage backend and ready-made folder
//! trees for testing discovery and resolution.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::scenarios;
pub use mocks::{MockFile, MockFolder, MockStorage};
