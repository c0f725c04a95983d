//! Message bus port — publish-only access to the shared messaging fabric.

use wattbridge_domain::error::BusError;

/// Hands a serialized message to the bus.
///
/// Publishing is synchronous: the message must be enqueued, in call order,
/// before this returns. Delivery itself is not awaited.
pub trait MessageBus: Send + Sync {
    /// Enqueue `payload` for publication on `topic`.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Unavailable`] when the bus refuses the message.
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError>;
}

impl<T: MessageBus + ?Sized> MessageBus for std::sync::Arc<T> {
    fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<(), BusError> {
        (**self).publish(topic, payload)
    }
}

/// Connection health reported by a bus adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusHealth {
    /// Initial connection not yet acknowledged.
    Connecting,
    /// Connected and accepting messages.
    Connected,
    /// The connection dropped; the adapter is retrying.
    Reconnecting {
        /// Consecutive failed attempts so far.
        attempt: u32,
    },
    /// The connection is gone and will not be retried.
    Lost {
        /// Cause reported by the adapter.
        reason: String,
    },
}
