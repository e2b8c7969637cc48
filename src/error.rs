// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{PasswordError, TokenError};
use crate::database::StoreError;

pub const MISSING_TOKEN_MESSAGE: &str = "No token provided, invalid authentication";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";
pub const GENERIC_MESSAGE: &str = "Something went wrong, try again later";

/// Every failure a request can end in. Rendered once, as `{"message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationFailed(String),
    BadRequest(String),

    // 413 Payload Too Large
    PayloadTooLarge,

    // 401 Unauthorized
    MissingToken,
    InvalidToken,
    InvalidCredentials,

    // 404 Not Found
    NotFound(String),
    RouteNotFound,

    // 400/404 raised by the store's own constraints
    ConstraintViolation { status: StatusCode, message: String },

    // 503 Service Unavailable
    ServiceUnavailable(String),

    // 500 Internal Server Error, detail is logged and never sent
    Unexpected(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::ConstraintViolation { status, .. } => *status,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationFailed(msg) => msg,
            ApiError::BadRequest(msg) => msg,
            ApiError::PayloadTooLarge => "Request body is too large",
            ApiError::MissingToken => MISSING_TOKEN_MESSAGE,
            ApiError::InvalidToken => INVALID_TOKEN_MESSAGE,
            ApiError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE,
            ApiError::NotFound(msg) => msg,
            ApiError::RouteNotFound => "Route does not exist",
            ApiError::ConstraintViolation { message, .. } => message,
            ApiError::ServiceUnavailable(msg) => msg,
            ApiError::Unexpected(_) => GENERIC_MESSAGE,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }

    pub fn job_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("No job found with id {}", id))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(messages) => ApiError::ConstraintViolation {
                status: StatusCode::BAD_REQUEST,
                message: messages.join(", "),
            },
            StoreError::InvalidId(raw) => ApiError::ConstraintViolation {
                status: StatusCode::NOT_FOUND,
                message: format!("No item found with id {}", raw),
            },
            StoreError::Duplicate { field } => ApiError::ConstraintViolation {
                status: StatusCode::BAD_REQUEST,
                message: format!(
                    "Duplicate value entered for {} field, please choose another value",
                    field
                ),
            },
            other => ApiError::Unexpected(format!("store error: {}", other)),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => ApiError::InvalidToken,
            // Failing to sign is our fault, not the caller's
            TokenError::Generation(e) => ApiError::Unexpected(format!("token generation: {}", e)),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Unexpected(err.to_string())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unexpected(detail) => write!(f, "unexpected error: {}", detail),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match &self {
            ApiError::Unexpected(detail) => tracing::error!("Request failed: {}", detail),
            ApiError::ServiceUnavailable(msg) => tracing::warn!("Service unavailable: {}", msg),
            _ => tracing::debug!("Request rejected with {}: {}", status, self.message()),
        }
        (status, Json(self.to_json())).into_response()
    }
}
