//! HTTP error response mapping.

use std::error::Error;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use wattbridge_domain::error::BridgeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`BridgeError`] to an HTTP response with appropriate status code.
pub struct ApiError(BridgeError);

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            BridgeError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            BridgeError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            other => {
                tracing::error!(error = other as &dyn Error, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
