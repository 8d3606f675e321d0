//! Indexer error types with HTTP status code mapping.
//!
//! [`IndexerError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response,
//! so the upstream decoder can tell a rejected payload from a failed store
//! or RPC call and decide whether to retry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "decode error: event 'Mint': missing field `amount`",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`IndexerError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Service error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                 |
/// |-----------|-----------------|-----------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request             |
/// | 2000–2999 | Not Found       | 404 Not Found               |
/// | 3000–3999 | Server          | 500 / 502                   |
/// | 4000–4999 | Event-Specific  | 422 Unprocessable Entity    |
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A decoded event does not match its contract ABI.
    #[error("decode error: {0}")]
    Decode(String),

    /// Path segment does not name a known deployment.
    #[error("unknown deployment: {0}")]
    UnknownDeployment(String),

    /// Entity with the given type and ID does not exist.
    #[error("{entity_type} '{id}' not found")]
    EntityNotFound {
        /// Entity type name.
        entity_type: String,
        /// Requested ID.
        id: String,
    },

    /// Event was emitted by a contract other than the configured one.
    #[error("event from {actual} does not belong to contract {expected}")]
    ContractMismatch {
        /// Configured contract address.
        expected: String,
        /// Address on the event.
        actual: String,
    },

    /// Entity store failure.
    #[error("store error: {0}")]
    Store(String),

    /// Live contract state read failed.
    #[error("contract read failed: {0}")]
    ContractRead(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IndexerError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Decode(_) => 1002,
            Self::UnknownDeployment(_) => 1003,
            Self::EntityNotFound { .. } => 2001,
            Self::ContractMismatch { .. } => 4001,
            Self::Store(_) => 3001,
            Self::ContractRead(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Decode(_) | Self::UnknownDeployment(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ContractMismatch { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ContractRead(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<sqlx::Error> for IndexerError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl IntoResponse for IndexerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
