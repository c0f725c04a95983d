//! JSON handlers for devices and their status.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use wattbridge_domain::device::Device;
use wattbridge_domain::status::StatusSnapshot;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the status endpoint.
pub enum StatusResponse {
    Ok(Json<StatusSnapshot>),
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list(State(state): State<AppState>) -> ListResponse {
    ListResponse::Ok(Json(state.query_service.list_devices()))
}

/// `GET /api/devices/{id}/status`
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusResponse, ApiError> {
    let snapshot = state.query_service.get_status(&id)?;
    Ok(StatusResponse::Ok(Json(snapshot)))
}

/// `POST /api/reload`
pub async fn reload(State(state): State<AppState>) -> Result<ListResponse, ApiError> {
    let devices = state.query_service.reload()?;
    Ok(ListResponse::Ok(Json(devices)))
}
