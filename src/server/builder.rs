//! Server startup
//!
//! Loads configuration from the environment and runs the HTTP server.

use tracing::{info, warn};

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;

/// Run the server with configuration from the environment
pub async fn run_server() -> Result<()> {
    info!("Starting CardHub application gateway");

    let config = Config::from_env()?;

    if config.application.admin_chat_id.is_none() {
        warn!("TELEGRAM_USER_ID is not set; submissions will be rejected with a configuration error");
    }
    if config.application.auto_approve && config.application.group_id.is_none() {
        warn!("AUTO_APPROVE is on but CARDHUB_GROUP_ID is not set; auto-approval stays disabled");
    }

    let server = HttpServer::new(&config);
    info!(
        "Server starting at: http://{}:{}",
        config.server.host, config.server.port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /version - Version info");
    info!("   POST /api/apply - Submit a membership application");
    info!("   GET  /auth/login - CONNECT sign-in redirect");
    info!("   GET  /auth/callback - CONNECT sign-in callback");
    info!("   GET  /auth/session - Current session");
    info!("   POST /auth/logout - Sign out");

    server.start().await
}
