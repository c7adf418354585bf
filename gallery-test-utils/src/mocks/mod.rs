//! Mock implementations for testing

mod storage;

pub use storage::{MockFile, MockFolder, MockNode, MockStorage};
