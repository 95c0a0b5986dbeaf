//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use daywindow_domain::error::DayWindowError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DayWindowError`] to an HTTP response with appropriate status code.
pub struct ApiError(DayWindowError);

impl From<DayWindowError> for ApiError {
    fn from(err: DayWindowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DayWindowError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            DayWindowError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            DayWindowError::Device(err) => {
                tracing::error!(error = %err, "device boundary error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            DayWindowError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
