//! Shared application state for axum handlers.

use std::sync::Arc;

use wattbridge_app::services::query_service::QueryService;

/// Application state shared across all axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only access to devices and their latest status.
    pub query_service: Arc<QueryService>,
}

impl AppState {
    /// Create a new application state from the query service.
    pub fn new(query_service: QueryService) -> Self {
        Self {
            query_service: Arc::new(query_service),
        }
    }
}
