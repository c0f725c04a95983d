//! MQTT adapter error types.

use wattbridge_domain::error::BusError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client refused the request, usually because its request
    /// queue is full or the event loop is gone.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),
}

impl MqttError {
    /// Convert into a [`BusError::Unavailable`] for propagation across the
    /// port boundary.
    pub fn into_domain(self) -> BusError {
        BusError::Unavailable(Box::new(self))
    }
}

impl From<rumqttc::ClientError> for MqttError {
    fn from(err: rumqttc::ClientError) -> Self {
        Self::Client(err)
    }
}

impl From<MqttError> for BusError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
