//! In-process message bus backed by a tokio broadcast channel.

use tokio::sync::broadcast;

use wattbridge_domain::error::BusError;

use crate::ports::MessageBus;

/// A message as seen by in-process subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub topic: String,
    pub payload: Vec<u8>,
}

/// In-process message bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the message is simply dropped).
#[derive(Clone)]
pub struct InProcessBus {
    sender: broadcast::Sender<BusMessage>,
}

impl InProcessBus {
    /// Create a new bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to messages on this bus.
    ///
    /// Returns a receiver that will get all messages published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.sender.subscribe()
    }
}

impl MessageBus for InProcessBus {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        // broadcast::send fails only when there are zero receivers.
        let _ = self.sender.send(BusMessage {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }
}
