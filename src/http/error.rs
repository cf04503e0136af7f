//! JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::access::services::AccessError;

/// Error returned by JSON API handlers.
///
/// Rendered as `{"success": false, "error": <message>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input.
    #[error("{0}")]
    BadRequest(String),
    /// Missing, unknown or expired session.
    #[error("{0}")]
    Unauthorized(String),
    /// Session lacks the required role.
    #[error("{0}")]
    Forbidden(String),
    /// Unknown resource.
    #[error("{0}")]
    NotFound(String),
    /// Server-side failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status for the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({"success": false, "error": self.to_string()});
        (status, Json(body)).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::EmptyEmail => Self::BadRequest(err.to_string()),
            AccessError::InvalidCredentials
            | AccessError::Unauthenticated
            | AccessError::Expired => Self::Unauthorized(err.to_string()),
            AccessError::Forbidden => Self::Forbidden(err.to_string()),
            AccessError::Domain(source) => {
                tracing::error!(error = %source, "session could not be opened");
                Self::Internal("Session could not be opened".to_owned())
            }
            AccessError::Store(source) => {
                tracing::error!(error = %source, "session store failure");
                Self::Internal("Session store unavailable".to_owned())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
