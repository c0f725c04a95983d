//! `[bus]` section of `wattbridge.toml`.

use std::time::Duration;

use serde::Deserialize;
use wattbridge_app::event_publisher::PublishSettings;

/// Broker connection and topic layout for change events.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub client_id: String,
    /// Prefix of every published topic (`<namespace>.device.<kind>`).
    pub namespace: String,
    pub keep_alive_secs: u16,
    /// Consecutive event-loop errors tolerated before the bus is declared
    /// lost.
    pub max_reconnect_attempts: u32,
}

impl MqttConfig {
    /// Keep-alive handed to the MQTT client.
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    /// Settings for the event publishers of `module`, publishing under this
    /// bus's namespace.
    #[must_use]
    pub fn publish_settings(&self, module: impl Into<String>) -> PublishSettings {
        PublishSettings {
            module: module.into(),
            namespace: self.namespace.clone(),
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "wattbridge".to_string(),
            namespace: "sentinel".to_string(),
            keep_alive_secs: 30,
            max_reconnect_attempts: 5,
        }
    }
}
