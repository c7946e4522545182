//! Telegram Configuration

use std::env;

/// Configuration for the Telegram Bot API client
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: Option<String>,
    /// Default recipient chat id (the administrator)
    pub admin_chat_id: Option<String>,
    /// Base URL
    pub base_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            admin_chat_id: None,
            base_url: "https://api.telegram.org".to_string(),
        }
    }
}

impl TelegramConfig {
    /// Load from environment variables
    ///
    /// Missing credentials are not an error here: the client reports a
    /// configuration error at send time, before any network call.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.bot_token = env::var("TELEGRAM_BOT_API_KEY").ok();
        config.admin_chat_id = env::var("TELEGRAM_USER_ID").ok();

        if let Ok(base_url) = env::var("TELEGRAM_API_URL") {
            config.base_url = base_url;
        }

        config
    }

    pub fn with_bot_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }

    pub fn with_admin_chat_id(mut self, chat_id: impl Into<String>) -> Self {
        self.admin_chat_id = Some(chat_id.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of a Bot API method for the configured token
    pub fn method_url(&self, token: &str, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            token,
            method
        )
    }
}
