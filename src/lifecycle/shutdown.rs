//! Stop-request fan-out.
//!
//! One `Shutdown` is created at boot. The HTTP server holds a receiver, the
//! signal task holds a clone that fires it. Dropping every clone also counts
//! as a stop request.

use tokio::sync::broadcast;

/// Sender side of the stop request. Clones share one channel.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for the next trigger. A trigger sent before subscribing is
    /// not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscriber to stop. Returns whether anyone was listening.
    pub fn trigger(&self) -> bool {
        match self.tx.send(()) {
            Ok(listeners) => {
                tracing::info!(listeners, "Shutdown requested");
                true
            }
            Err(_) => {
                tracing::debug!("Shutdown requested with no listeners");
                false
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` sees a trigger or every `Shutdown` clone is dropped.
pub async fn stopped(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
