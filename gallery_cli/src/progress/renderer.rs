//! Progress rendering for the CLI
//!
//! This module handles the visual rendering of discovery events,
//! turning them into a spinner with running counts.

use colored::*;
use gallery_core::DiscoveryEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc;

use super::stats::ScanStats;

/// Render walk events from a channel until the walk drops its sender
pub async fn render_progress(mut rx: mpsc::Receiver<DiscoveryEvent>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(event) = rx.recv().await {
        renderer.handle_event(&event);
    }

    renderer.finish();
}

/// Spinner showing the running counts of a walk
pub struct ProgressRenderer {
    spinner: ProgressBar,
    stats: ScanStats,
}

impl ProgressRenderer {
    /// Create a renderer drawing to stderr
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(spinner)
    }

    /// Create a renderer that draws nothing
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(spinner: ProgressBar) -> Self {
        Self {
            spinner,
            stats: ScanStats::default(),
        }
    }

    /// Handle a walk event
    pub fn handle_event(&mut self, event: &DiscoveryEvent) {
        if let DiscoveryEvent::FolderSkipped { path, reason } = event {
            log::debug!(
                "Skipped folder {} ({reason})",
                path.as_deref().unwrap_or("?")
            );
        }

        self.stats.record(event);
        self.spinner.set_message(format!(
            "{}: {}",
            "Scanning".bold(),
            self.stats.summary()
        ));
    }

    /// Counts rendered so far
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Clear the spinner
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
