//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use cohort::CohortError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client (malformed or structurally invalid
    /// upload).
    BadRequest(String),
    /// Internal server error (store failures).
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<CohortError> for ApiError {
    fn from(err: CohortError) -> Self {
        match err {
            // Problems with the uploaded data are the client's
            CohortError::Csv(_)
            | CohortError::MissingColumns(_)
            | CohortError::EmptyData(_) => ApiError::BadRequest(err.to_string()),
            // Everything else is ours
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
