//! Error handling for the gateway
//!
//! This module defines the top-level error type used by the HTTP layer.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::clients::ClientError;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upstream client errors
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Session errors
    #[error("Session error: {0}")]
    Session(String),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn session<S: Into<String>>(message: S) -> Self {
        Self::Session(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            GatewayError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            GatewayError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            GatewayError::Client(client_error) => match client_error {
                ClientError::Configuration { .. } => (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "CLIENT_CONFIG_ERROR",
                    client_error.to_string(),
                ),
                ClientError::RemoteApi { .. } => (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "REMOTE_API_ERROR",
                    client_error.to_string(),
                ),
                ClientError::Network { .. } => (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "NETWORK_ERROR",
                    client_error.to_string(),
                ),
                ClientError::Serialization { .. } => (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "PARSING_ERROR",
                    client_error.to_string(),
                ),
            },
            GatewayError::Session(_) | GatewayError::Jwt(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "SESSION_ERROR",
                "Session invalid or expired".to_string(),
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
