//! Progress reporting module for the CLI
//!
//! Discovery events travel from the blocking walk to an async renderer over
//! a channel, so the walk never waits on terminal output.

pub mod provider;
pub mod renderer;
pub mod stats;
pub mod utils;

// Re-export main helpers
pub use provider::{ChannelObserver, create_progress_infrastructure};
pub use renderer::{ProgressRenderer, render_progress};
pub use stats::ScanStats;
pub use utils::{format_bytes, format_count};
