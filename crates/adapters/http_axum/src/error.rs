//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use pulsehub_domain::error::HubError;

/// JSON error body returned by endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HubError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HubError);

impl From<HubError> for ApiError {
    fn from(err: HubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            HubError::Closed => {
                tracing::warn!(error = %self.0, "rejecting request, hub is not running");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
