//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/devices", get(devices::list))
        .route("/devices/{id}/status", get(devices::status))
        .route("/reload", post(devices::reload))
}
