//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the engine and the adapter
//! layer can depend on them without creating circular dependencies.

pub mod gateway;
pub mod message_bus;

pub use gateway::GatewayTransport;
pub use message_bus::{BusHealth, MessageBus};
