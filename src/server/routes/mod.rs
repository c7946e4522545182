//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod apply;
pub mod auth;
pub mod health;

use actix_web::web;

/// Standard API response structure for the auxiliary endpoints
///
/// The form submission endpoint returns the bare `{status, message}` shape the
/// page expects instead.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Register every route group
pub fn configure(cfg: &mut web::ServiceConfig) {
    apply::configure_routes(cfg);
    auth::configure_routes(cfg);
    health::configure_routes(cfg);
}
