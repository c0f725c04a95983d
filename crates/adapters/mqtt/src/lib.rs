//! # wattbridge-adapter-mqtt
//!
//! MQTT adapter — carries wattbridge change events to a broker.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive
//! - Implement the [`MessageBus`](wattbridge_app::ports::MessageBus) port by
//!   enqueueing every message without waiting for delivery
//! - Report connection health on a `watch` channel so the composition root
//!   can stop the process when the broker is gone for good
//!
//! ## Dependency rule
//! Same as other adapters: depends on `wattbridge-app` and `wattbridge-domain`.

pub mod bus;
pub mod config;
pub mod error;
pub mod health;

pub use bus::{MqttBus, MqttDriver, connect};
pub use config::MqttConfig;
pub use error::MqttError;
