//! Service error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for the backend. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "missing field: rent",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ApiError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                 |
/// |-----------|-------------------|-----------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request             |
/// | 2000–2999 | State/Not Found   | 404 Not Found / 409 Conflict|
/// | 3000–3999 | Server/Upstream   | 500 / 502                   |
/// | 4000–4999 | Authentication    | 401 / 403                   |
///
/// Storage and upstream failures carry internal detail for the log line
/// only; the serialized body keeps the generic variant message so no
/// internals leak to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed input the caller can correct.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No credential, or a credential not of the form `Bearer <token>`.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Valid credential but insufficient role, or a failed verification.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Uniqueness violation, e.g. a duplicate agreement.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Lookup miss where the caller needs to know.
    #[error("not found: {0}")]
    NotFound(String),

    /// Identity provider or payment gateway failure.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Storage layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::Conflict(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Upstream(_) => 3002,
            Self::Unauthorized(_) => 4001,
            Self::Forbidden(_) => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message to put in the response body.
    ///
    /// Server-side variants hide their payload; the caller only sees the
    /// generic variant text. Validation and authorization variants keep
    /// enough detail for the caller to self-correct.
    #[must_use]
    fn public_message(&self) -> String {
        match self {
            Self::Upstream(_) => "upstream service unavailable".to_string(),
            Self::Persistence(_) | Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict("record already exists".to_string());
        }
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.public_message(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            ApiError::Validation(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized(String::new()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden(String::new()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Conflict(String::new()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::NotFound(String::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream(String::new()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Persistence(String::new()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_do_not_leak_detail() {
        let err = ApiError::Persistence("password=hunter2 connection refused".to_string());
        let msg = err.public_message();
        assert!(!msg.contains("hunter2"));
        assert_eq!(msg, "internal server error");
    }

    #[test]
    fn validation_errors_keep_detail() {
        let err = ApiError::Validation("missing field: rent".to_string());
        assert!(err.public_message().contains("rent"));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ApiError::Validation(String::new()).error_code(), 1001);
        assert_eq!(ApiError::Conflict(String::new()).error_code(), 2002);
        assert_eq!(ApiError::Unauthorized(String::new()).error_code(), 4001);
        assert_eq!(ApiError::Forbidden(String::new()).error_code(), 4002);
    }
}
