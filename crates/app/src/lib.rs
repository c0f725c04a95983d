//! # wattbridge-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `GatewayTransport` — raw reads against the energy gateway's local API
//!   - `MessageBus` — synchronous publish onto the shared messaging fabric
//! - Provide the **change-notifying cache** that every mutation flows through
//! - Provide the **poll scheduler** that reads the gateway and feeds the caches
//! - Define **driving/inbound ports** as use-case structs:
//!   - `QueryService` — list devices, get status, reload
//! - Provide **in-process infrastructure** (event bus, transport watchdog)
//!   that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `wattbridge-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod change_cache;
pub mod event_bus;
pub mod event_publisher;
pub mod gateway_reader;
pub mod poll_scheduler;
pub mod ports;
pub mod services;
pub mod watchdog;

#[cfg(test)]
mod testing;
