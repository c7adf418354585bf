//! Progress provider implementation for CLI
//!
//! Bridges the discovery walk's event callback with the CLI's rendering task.

use gallery_core::DiscoveryEvent;
use tokio::sync::mpsc;

/// Events buffered between the walk and the renderer
const CHANNEL_CAPACITY: usize = 256;

/// Channel-based walk observer for CLI rendering
///
/// Sends walk events through a channel to a separate rendering task. Events
/// are dropped when the renderer falls behind; the walk never blocks on it.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::Sender<DiscoveryEvent>,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::Sender<DiscoveryEvent>) -> Self {
        Self { tx }
    }

    /// Forward one walk event
    pub fn observe(&self, event: &DiscoveryEvent) {
        // Try to send, but don't block or panic if receiver is dropped
        let _ = self.tx.try_send(event.clone());
    }
}

/// Create an observer and renderer channel pair for a scan
pub fn create_progress_infrastructure() -> (ChannelObserver, mpsc::Receiver<DiscoveryEvent>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    (ChannelObserver::new(tx), rx)
}
