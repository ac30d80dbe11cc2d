//! API error responses
//!
//! Maps the domain error taxonomy onto HTTP statuses: Auth → 401,
//! InvalidInput → 400, NotFound → 404, everything else → 500 with the
//! cause logged rather than leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pomora_domain::PomoraError;
use serde::Serialize;
use tracing::error;

/// Error type returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub PomoraError);

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable taxonomy label (`auth`, `invalid_input`, ...).
    pub error: &'static str,
    pub message: String,
}

impl From<PomoraError> for ApiError {
    fn from(error: PomoraError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PomoraError::Auth(_) => StatusCode::UNAUTHORIZED,
            PomoraError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PomoraError::NotFound(_) => StatusCode::NOT_FOUND,
            PomoraError::Database(_)
            | PomoraError::Config(_)
            | PomoraError::Network(_)
            | PomoraError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Log the cause; the wire gets a generic retryable message.
            error!(error = %self.0, "request failed");
            "internal error, try again".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { error: self.0.label(), message })).into_response()
    }
}
