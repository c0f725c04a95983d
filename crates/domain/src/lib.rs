//! # wattbridge-domain
//!
//! Pure domain model for the wattbridge energy-gateway bridge.
//!
//! ## Responsibilities
//! - Foundational types: error taxonomy, timestamps
//! - Define **Devices** (identity records discovered at load time)
//! - Define **Status snapshots** (point-in-time gateway measurements)
//! - Define **Change events** (the normalized message published on the bus)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod device;
pub mod event;
pub mod status;
