//! Health check and status endpoints

use std::borrow::Cow;

use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Basic health check endpoint
///
/// Used by load balancers and monitoring; reports whether the downstream
/// credentials this deployment needs are present.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let config = state.config();
    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        notifications_configured: config.application.admin_chat_id.is_some()
            && config.telegram.bot_token.is_some(),
        auto_approve_configured: config.application.auto_approve
            && config.application.group_id.is_some()
            && config.discourse.cookie.is_some()
            && config.discourse.csrf_token.is_some()
            && config.discourse.user_agent.is_some(),
    };

    HttpResponse::Ok().json(ApiResponse::success(health_status))
}

/// Version information endpoint
pub async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let version_info = VersionInfo {
        name: Cow::Borrowed(env!("CARGO_PKG_NAME")),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    HttpResponse::Ok().json(ApiResponse::success(version_info))
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    notifications_configured: bool,
    auto_approve_configured: bool,
}

/// Version information
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    name: Cow<'static, str>,
    version: Cow<'static, str>,
}
