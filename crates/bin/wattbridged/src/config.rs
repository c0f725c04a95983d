//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wattbridge.toml` in the working directory. Every field but the
//! gateway id has a sensible default so the file is optional. Environment
//! variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use wattbridge_adapter_gateway_reqwest::GatewayConfig;
use wattbridge_adapter_mqtt::MqttConfig;
use wattbridge_app::event_publisher::PublishSettings;
use wattbridge_app::poll_scheduler::PollSettings;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Module name stamped into every published event.
    pub module: String,
    /// Energy gateway connection.
    pub gateway: GatewayConfig,
    /// Poll cadence.
    pub poll: PollConfig,
    /// MQTT message bus.
    pub bus: MqttConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Poll cadence, in seconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between two polls after a success.
    pub interval_secs: u64,
    /// Delay before the next poll after a failure.
    pub backoff_secs: u64,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Serve the read-only HTTP API.
    pub enabled: bool,
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `wattbridge.toml` (if present), apply
    /// environment-variable overrides, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("wattbridge.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("WATTBRIDGE_MODULE") {
            self.module = val;
        }
        if let Some(val) = lookup("WATTBRIDGE_GATEWAY_ID") {
            self.gateway.id = val;
        }
        if let Some(val) = lookup("WATTBRIDGE_GATEWAY_URL") {
            self.gateway.base_url = val;
        }
        if let Some(val) = lookup("WATTBRIDGE_MQTT_HOST") {
            self.bus.broker_host = val;
        }
        if let Some(port) = lookup("WATTBRIDGE_MQTT_PORT").and_then(|val| val.parse().ok()) {
            self.bus.broker_port = port;
        }
        if let Some(val) = lookup("WATTBRIDGE_NAMESPACE") {
            self.bus.namespace = val;
        }
        if let Some(val) = lookup("WATTBRIDGE_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = lookup("WATTBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.id.trim().is_empty() {
            return Err(ConfigError::Validation("gateway id must not be empty".to_string()));
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::Validation("poll interval must be non-zero".to_string()));
        }
        if self.poll.backoff_secs <= self.poll.interval_secs {
            return Err(ConfigError::Validation(
                "poll backoff must be longer than the interval".to_string(),
            ));
        }
        if self.bus.broker_port == 0 {
            return Err(ConfigError::Validation("broker port must be non-zero".to_string()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Re-arm delays for the poll scheduler.
    #[must_use]
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(self.poll.interval_secs),
            backoff: Duration::from_secs(self.poll.backoff_secs),
        }
    }

    /// Identity stamped on published events.
    #[must_use]
    pub fn publish_settings(&self) -> PublishSettings {
        self.bus.publish_settings(self.module.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module: "powerwall".to_string(),
            gateway: GatewayConfig::default(),
            poll: PollConfig::default(),
            bus: MqttConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            backoff_secs: 60,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wattbridged=info,wattbridge=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
