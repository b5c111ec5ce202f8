//! Shutdown coordination for the gateway.

use tokio::sync::broadcast;

/// Hands the server loop (and tests) a channel that fires once on shutdown.
///
/// The server selects on a subscribed receiver next to the OS signal
/// future; either source stops the accept loop gracefully.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
