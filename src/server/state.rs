//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::auth::SessionManager;
use crate::clients::{ConnectClient, DiscourseClient, TelegramClient};
use crate::config::Config;
use crate::core::application::ApplicationHandler;

/// HTTP server state shared across handlers
///
/// All submissions see the same immutable configuration and the same
/// long-lived HTTP connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// CONNECT identity client for the sign-in flow
    pub connect: Arc<ConnectClient>,
    /// Session cookie signing and verification
    pub sessions: SessionManager,
    /// Membership application handler
    pub handler: ApplicationHandler,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config) -> Self {
        let http_client = reqwest::Client::new();

        let connect = Arc::new(ConnectClient::with_http_client(
            config.connect.clone(),
            http_client.clone(),
        ));
        let discourse = Arc::new(DiscourseClient::with_http_client(
            config.discourse.clone(),
            http_client.clone(),
        ));
        let telegram = Arc::new(TelegramClient::with_http_client(
            config.telegram.clone(),
            http_client,
        ));

        let sessions = SessionManager::new(&config.auth.secret);
        let handler = ApplicationHandler::new(
            config.application.admin_chat_id.clone(),
            config.application.approval_policy(),
            discourse,
            telegram,
        );

        Self {
            config: Arc::new(config),
            connect,
            sessions,
            handler,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
