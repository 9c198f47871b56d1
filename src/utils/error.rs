//! Error handling for the spa-manager API
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the spa-manager API
pub type Result<T> = std::result::Result<T, SpaError>;

/// Main error type for the spa-manager API
#[derive(Error, Debug)]
pub enum SpaError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token decode/validation failures, collapsed to one kind.
    ///
    /// The specific cause (malformed structure, bad signature, expiry,
    /// algorithm mismatch) is logged but never surfaced to the caller.
    #[error("Invalid token")]
    InvalidToken,

    /// Credential check failed at token issuance
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authentication required but the request carries no usable identity
    #[error("Authentication required")]
    Unauthenticated,

    /// Identity role is below the endpoint's minimum role
    #[error("Insufficient role for resource")]
    InsufficientRole,

    /// Identity lacks one or more required scopes; lists only the names
    #[error("Missing required scopes: {}", .0.join(", "))]
    MissingScopes(Vec<String>),

    /// Forbidden for reasons beyond role/scope (e.g. cross-identity access)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResponseError for SpaError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            SpaError::InvalidToken => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
            ),
            SpaError::InvalidCredentials => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            SpaError::Unauthenticated => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                self.to_string(),
            ),
            SpaError::InsufficientRole => (
                actix_web::http::StatusCode::FORBIDDEN,
                "INSUFFICIENT_ROLE",
                self.to_string(),
            ),
            SpaError::MissingScopes(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "MISSING_SCOPES",
                self.to_string(),
            ),
            SpaError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            SpaError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            SpaError::BadRequest(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                self.to_string(),
            ),
            SpaError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            SpaError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

/// Helper functions for creating specific errors
impl SpaError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
