//! API error taxonomy and its [`axum::response::IntoResponse`] mapping.
//!
//! Validation failures are surfaced verbatim with the offending field;
//! persistence and unexpected errors are logged server-side with full
//! detail and returned to the caller as a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing, empty, or malformed.
    #[error("invalid field `{field}`: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Bad credentials or an invalid/expired session token. Deliberately
    /// carries no detail about which part of the check failed.
    #[error("invalid admin credentials")]
    Authentication,

    /// A create would violate a uniqueness rule.
    #[error("{0}")]
    Conflict(String),

    /// The document store is unreachable or returned a corrupted record.
    #[error("persistence failure: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Anything else that should never happen in a healthy process.
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Persistence(Box::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Persistence(Box::new(e))
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        ApiError::Internal(Box::new(e))
    }
}

/// JSON error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, field) = match &self {
            ApiError::Validation { field, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string(), Some(*field))
            }
            ApiError::Authentication => (StatusCode::UNAUTHORIZED, self.to_string(), None),
            ApiError::Conflict(_) => (StatusCode::BAD_REQUEST, self.to_string(), None),
            ApiError::Persistence(e) => {
                tracing::error!("persistence failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                    None,
                )
            }
            ApiError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { error: message, field })).into_response()
    }
}
