//! # API Errors
//!
//! Maps core errors onto HTTP status codes and `{"error": ...}` bodies.
//!
//! | Status | Errors |
//! |---|---|
//! | 400 | `MissingField`, `Validation`, `Unparseable` |
//! | 422 | `InvalidType`, `Conflict` |
//! | 409 | `Duplicate` |
//! | 404 | `NotFound` |
//! | 500 | `Storage`, `Serialization`, `InvalidPattern`, `Io` |
//!
//! Internal failures are logged and answered with a generic message.

use super::types::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strand_core::StrandError;

/// An error ready to be sent to a client.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A 400 with a custom message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// A 401.
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }

    /// A 429.
    pub fn too_many_requests() -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "Too Many Requests".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StrandError> for ApiError {
    fn from(err: StrandError) -> Self {
        let status = match &err {
            StrandError::MissingField(_)
            | StrandError::Validation { .. }
            | StrandError::Unparseable => StatusCode::BAD_REQUEST,
            StrandError::InvalidType { .. } | StrandError::Conflict(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StrandError::Duplicate => StatusCode::CONFLICT,
            StrandError::NotFound => StatusCode::NOT_FOUND,
            StrandError::Storage(_)
            | StrandError::Serialization(_)
            | StrandError::InvalidPattern(_)
            | StrandError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Internal failure");
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        Self { status, message }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "Rejected path");
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(%rejection, "Rejected query string");
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// =============================================================================
// TESTS
// =============================================================================
