//! API error types for lifecycle endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_lifecycle::LifecycleError;
use serde::Serialize;
use thiserror::Error;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client handling.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// Lifecycle API error type.
#[derive(Debug, Error)]
pub enum ApiLifecycleError {
    /// Domain error from the lifecycle engine.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// No identity context on the request.
    #[error("Authentication required")]
    Unauthorized,

    /// Malformed request input.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ApiLifecycleError {
    /// The HTTP status and stable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiLifecycleError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiLifecycleError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            ApiLifecycleError::Lifecycle(err) => match err {
                LifecycleError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
                LifecycleError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                LifecycleError::PreconditionFailed(_) => {
                    (StatusCode::PRECONDITION_FAILED, "precondition_failed")
                }
                LifecycleError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
                LifecycleError::Unavailable => {
                    (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
                }
                LifecycleError::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
        }
    }
}

impl IntoResponse for ApiLifecycleError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Storage details stay in the logs; the body carries the taxonomy
        // code and a safe message.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiLifecycleError::Lifecycle(LifecycleError::Forbidden),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiLifecycleError::Lifecycle(LifecycleError::NotFound { resource: "account" }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiLifecycleError::Lifecycle(LifecycleError::PreconditionFailed("x".into())),
                StatusCode::PRECONDITION_FAILED,
            ),
            (
                ApiLifecycleError::Lifecycle(LifecycleError::Conflict("x".into())),
                StatusCode::CONFLICT,
            ),
            (
                ApiLifecycleError::Lifecycle(LifecycleError::Unavailable),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (ApiLifecycleError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ApiLifecycleError::Validation("bad id".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            let (status, _) = err.status_and_code();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let err = ApiLifecycleError::Lifecycle(LifecycleError::Internal(sqlx::Error::RowNotFound));
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "internal_error");
    }
}
