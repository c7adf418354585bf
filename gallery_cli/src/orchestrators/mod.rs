//! Command orchestrators for business logic
//!
//! This module provides orchestrators that coordinate between the CLI layer
//! and the core discovery service.

pub mod scan_orchestrator;

pub use scan_orchestrator::{ScanOptions, ScanOrchestrator, ScanReport};
