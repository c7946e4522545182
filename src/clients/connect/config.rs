//! CONNECT Configuration

use std::env;

/// Configuration for the Linux.do CONNECT OIDC client
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// Issuer base URL
    pub issuer: String,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            issuer: "https://connect.linux.do".to_string(),
        }
    }
}

impl ConnectConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.client_id = env::var("LINUX_DO_CLIENT_ID").ok();
        config.client_secret = env::var("LINUX_DO_CLIENT_SECRET").ok();

        if let Ok(issuer) = env::var("LINUX_DO_CONNECT_ISSUER") {
            config.issuer = issuer;
        }

        config
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Authorization endpoint
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/oauth2/authorize", self.issuer.trim_end_matches('/'))
    }

    /// Token endpoint
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.issuer.trim_end_matches('/'))
    }

    /// Userinfo endpoint
    pub fn userinfo_endpoint(&self) -> String {
        format!("{}/api/user", self.issuer.trim_end_matches('/'))
    }
}
