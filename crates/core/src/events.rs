//! Refresh signaling
//!
//! An explicit publish/subscribe channel replacing ambient "bump a global
//! counter" refresh patterns: producers notify after a terminal session
//! write, consumers re-fetch analytics on each signal. Subscriptions end
//! when the receiver is dropped.

use pomora_domain::constants::REFRESH_CHANNEL_CAPACITY;
use tokio::sync::broadcast;

/// Broadcast bus carrying analytics refresh signals.
#[derive(Debug, Clone)]
pub struct RefreshBus {
    tx: broadcast::Sender<()>,
}

impl RefreshBus {
    /// Create a new bus with the default capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(REFRESH_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to refresh signals.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal that derived data should be refreshed.
    ///
    /// A send with no live subscribers is fine; the signal is simply
    /// dropped.
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }

    /// Number of live subscribers, used by lifecycle tests.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RefreshBus {
    fn default() -> Self {
        Self::new()
    }
}
