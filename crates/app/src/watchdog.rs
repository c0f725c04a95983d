//! Transport watchdog — turns a lost bus connection into a fatal error.

use tokio::sync::watch;

use wattbridge_domain::error::BridgeError;

use crate::ports::BusHealth;

/// Watches the bus adapter's health signal.
pub struct TransportWatchdog {
    health: watch::Receiver<BusHealth>,
}

impl TransportWatchdog {
    pub fn new(health: watch::Receiver<BusHealth>) -> Self {
        Self { health }
    }

    /// Wait until the bus reports [`BusHealth::Lost`].
    ///
    /// Transient states (connecting, reconnecting) are logged and ignored.
    /// The watchdog also resolves when the adapter drops its health sender,
    /// since nothing is left driving the connection.
    pub async fn watch(mut self) -> BridgeError {
        loop {
            let current = self.health.borrow_and_update().clone();
            match current {
                BusHealth::Lost { reason } => {
                    tracing::error!(%reason, "message bus connection lost");
                    return BridgeError::BusConnectionLost { reason };
                }
                BusHealth::Reconnecting { attempt } => {
                    tracing::warn!(attempt, "message bus reconnecting");
                }
                BusHealth::Connected => tracing::info!("message bus connected"),
                BusHealth::Connecting => tracing::debug!("message bus connecting"),
            }

            if self.health.changed().await.is_err() {
                tracing::error!("message bus driver stopped");
                return BridgeError::BusConnectionLost {
                    reason: "bus driver stopped".to_string(),
                };
            }
        }
    }
}
