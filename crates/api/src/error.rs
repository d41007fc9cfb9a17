//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, OrderError};

/// Body of every 500 response. The cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Внутренняя ошибка сервера.";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed body or path.
    BadRequest(String),
    /// An order rule was broken, including unknown ids.
    Order(OrderError),
    /// The route exists but not for this method.
    MethodNotAllowed,
    /// Store or database failure, with the detail for the log.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Order(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::MethodNotAllowed => {
                let body = serde_json::json!({ "msg": "method not allowed" });
                return (StatusCode::METHOD_NOT_ALLOWED, axum::Json(body)).into_response();
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Order(err) => ApiError::Order(err),
            DomainError::Store(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
