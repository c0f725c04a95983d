//! # wattbridge-adapter-gateway-reqwest
//!
//! Gateway adapter — implements the
//! [`GatewayTransport`](wattbridge_app::ports::GatewayTransport) port against
//! the gateway's local HTTPS API.
//!
//! Every read is `GET <base_url>/api/<path>` with a bounded timeout. A
//! non-success status is a remote error; anything that prevents a response
//! (connect failure, TLS, timeout) is a transport error. Bodies are returned
//! untouched; decoding belongs to the reader in `wattbridge-app`.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `wattbridge-app` and `wattbridge-domain`.

pub mod client;
pub mod config;
pub mod error;

pub use client::ReqwestGateway;
pub use config::GatewayConfig;
pub use error::GatewayHttpError;
