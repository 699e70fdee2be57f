//! Web API error types, their HTTP mappings, and the JSON response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::error::TestOrdersError;
use crate::web::auth::AuthError;

/// Web API specific errors with HTTP status code mappings.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationError { reason: String },

    #[error("Database operation failed: {operation}")]
    DatabaseError { operation: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn auth_error(reason: impl Into<String>) -> Self {
        Self::AuthenticationError {
            reason: reason.into(),
        }
    }

    pub fn database_error(operation: impl Into<String>) -> Self {
        Self::DatabaseError {
            operation: operation.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_code, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found"),

            ApiError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", message.as_str())
            }

            ApiError::AuthenticationError { reason } => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_FAILED",
                reason.as_str(),
            ),

            ApiError::DatabaseError { operation } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                operation.as_str(),
            ),

            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        };

        let error_response = json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<TestOrdersError> for ApiError {
    fn from(err: TestOrdersError) -> Self {
        match err {
            TestOrdersError::OrderNotFound(_) => ApiError::NotFound,
            TestOrdersError::Validation(message) => ApiError::BadRequest { message },
            TestOrdersError::Database(_) => ApiError::database_error("Database operation failed"),
            _ => ApiError::Internal,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::auth_error(err.to_string())
    }
}

/// Result type alias for web API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Success envelope wrapping every JSON payload the API returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}
