//! Gateway configuration
//!
//! All configuration comes from environment variables, read once at process
//! start into an immutable `Config` that is shared by reference. Clients keep
//! their own sections so they can be constructed and tested in isolation.

use std::env;

use crate::clients::connect::ConnectConfig;
use crate::clients::discourse::DiscourseConfig;
use crate::clients::telegram::TelegramConfig;
use crate::core::application::ApprovalPolicy;
use crate::utils::error::{GatewayError, Result};

/// Fallback signing secret for local development builds only
const DEV_AUTH_SECRET: &str = "development-secret-please-change-in-production";

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible base URL, used for the OAuth redirect URI
    pub public_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Application handler configuration
#[derive(Debug, Clone, Default)]
pub struct ApplicationConfig {
    /// Administrator Telegram chat id; submissions are rejected without one
    pub admin_chat_id: Option<String>,
    /// Unattended approval flag
    pub auto_approve: bool,
    /// Minimum trust level for unattended approval
    pub min_trust_level: u8,
    /// Target board group id
    pub group_id: Option<String>,
}

impl ApplicationConfig {
    /// Policy snapshot for one submission
    pub fn approval_policy(&self) -> ApprovalPolicy {
        ApprovalPolicy {
            auto_approve: self.auto_approve,
            min_trust_level: self.min_trust_level,
            group_id: self.group_id.clone(),
        }
    }
}

/// Session signing configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub application: ApplicationConfig,
    pub auth: AuthConfig,
    pub telegram: TelegramConfig,
    pub discourse: DiscourseConfig,
    pub connect: ConnectConfig,
}

impl Config {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut server = ServerConfig::default();
        if let Ok(host) = env::var("SERVER_HOST") {
            server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            server.port = port
                .parse()
                .map_err(|_| GatewayError::config(format!("Invalid SERVER_PORT: {}", port)))?;
        }
        if let Ok(public_url) = env::var("PUBLIC_URL") {
            server.public_url = public_url.trim_end_matches('/').to_string();
        }

        let application = ApplicationConfig {
            admin_chat_id: env::var("TELEGRAM_USER_ID").ok().filter(|v| !v.is_empty()),
            auto_approve: env::var("AUTO_APPROVE").map(|v| v == "true").unwrap_or(false),
            min_trust_level: env::var("MIN_TRUST_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            group_id: env::var("CARDHUB_GROUP_ID").ok().filter(|v| !v.is_empty()),
        };

        let auth = AuthConfig {
            secret: Self::auth_secret()?,
        };

        Ok(Self {
            server,
            application,
            auth,
            telegram: TelegramConfig::from_env(),
            discourse: DiscourseConfig::from_env(),
            connect: ConnectConfig::from_env(),
        })
    }

    /// Signing secret, with a fixed fallback outside release builds
    fn auth_secret() -> Result<String> {
        if let Ok(secret) = env::var("AUTH_SECRET") {
            if !secret.is_empty() {
                return Ok(secret);
            }
        }
        if cfg!(debug_assertions) {
            return Ok(DEV_AUTH_SECRET.to_string());
        }
        Err(GatewayError::config("AUTH_SECRET is required"))
    }

    /// Redirect URI registered with the CONNECT application
    pub fn oauth_redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.server.public_url)
    }
}
