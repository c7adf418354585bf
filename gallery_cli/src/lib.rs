//! Gallery CLI library
//!
//! Local filesystem storage, layered configuration, output formatting and
//! progress rendering for the `gallery` binary.

pub mod config;
pub mod error;
pub mod orchestrators;
pub mod output;
pub mod progress;
pub mod storage;
pub mod terminal;
