//! # wattbridge-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small **JSON API** over the device and status caches
//!   (`/api/devices`, `/api/devices/{id}/status`, `/api/reload`)
//! - Map HTTP requests into [`QueryService`](wattbridge_app::services::query_service::QueryService)
//!   calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! Handlers only read the caches. They never wait for, nor trigger, a
//! gateway poll.
//!
//! ## Dependency rule
//! Depends on `wattbridge-app` (for services) and `wattbridge-domain` (for
//! domain types used in response mapping). Never leaks axum types into the
//! domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
