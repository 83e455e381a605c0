//! Error types for the storefront API.
//!
//! ## Status Mapping
//! ```text
//! ErrorKind::NotFound   → 404 Not Found
//! ErrorKind::Validation → 400 Bad Request
//! ErrorKind::Conflict   → 409 Conflict
//! ErrorKind::Transient  → 503 Service Unavailable
//! ```
//!
//! Every response body carries the machine-readable kind AND the
//! human-readable reason, so clients can branch on one and display the
//! other.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use stride_core::{CoreError, ErrorKind};

/// An error leaving the API boundary.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    /// A validation error with a fixed message.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// JSON error body: `{"error": "validation", "message": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: ErrorKind,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Transient => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(ErrorBody {
            error: self.kind,
            message: &self.message,
        });

        (status, body).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
