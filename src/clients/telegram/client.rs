//! Telegram Client
//!
//! Single `sendMessage` call against the Bot API; no retry, platform default
//! timeouts.

use reqwest::{Client, Response};
use serde_json::{Value, json};
use tracing::debug;

use crate::clients::ClientError;

use super::config::TelegramConfig;

const SERVICE: &str = "telegram";

/// Message formatting accepted by the Bot API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    Html,
}

impl ParseMode {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::MarkdownV2 => "MarkdownV2",
            Self::Html => "HTML",
        }
    }
}

/// One outbound notification
#[derive(Debug, Clone, Default)]
pub struct SendMessage {
    /// Required message body
    pub content: String,
    /// Recipient chat id; falls back to the configured administrator
    pub user_id: Option<String>,
    /// Optional contact line appended to the body
    pub contact: Option<String>,
    /// Optional source-page line appended to the body
    pub source: Option<String>,
    pub parse_mode: Option<ParseMode>,
}

impl SendMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = Some(parse_mode);
        self
    }

    /// Final text: non-empty lines joined with blank-line separation
    pub fn compose_text(&self) -> String {
        let mut parts = vec![self.content.clone()];
        if let Some(contact) = &self.contact {
            parts.push(format!("联系方式: {}", contact));
        }
        if let Some(source) = &self.source {
            parts.push(format!("来源页面: {}", source));
        }
        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Telegram Bot API client
#[derive(Debug, Clone)]
pub struct TelegramClient {
    config: TelegramConfig,
    http_client: Client,
}

impl TelegramClient {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Shared connection pool from the caller
    pub fn with_http_client(config: TelegramConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Send one message
    ///
    /// Fails with a configuration error before any network call when the bot
    /// token or the resolved recipient is missing.
    pub async fn send_message(&self, message: SendMessage) -> Result<(), ClientError> {
        let token = self.config.bot_token.as_deref().ok_or_else(|| {
            ClientError::configuration(
                SERVICE,
                "Telegram 凭证未配置，请设置 TELEGRAM_BOT_API_KEY 和 TELEGRAM_USER_ID",
            )
        })?;

        let chat_id = message
            .user_id
            .as_deref()
            .or(self.config.admin_chat_id.as_deref())
            .ok_or_else(|| {
                ClientError::configuration(
                    SERVICE,
                    "Telegram 凭证未配置，请设置 TELEGRAM_BOT_API_KEY 和 TELEGRAM_USER_ID",
                )
            })?;

        let mut body = json!({
            "chat_id": chat_id,
            "text": message.compose_text(),
        });

        if let Some(parse_mode) = message.parse_mode {
            body["parse_mode"] = json!(parse_mode.as_str());
        }

        let url = self.config.method_url(token, "sendMessage");
        debug!(chat_id, "Sending Telegram notification");

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::network(SERVICE, format!("Network error: {}", e)))?;

        self.handle_response(response).await?;
        Ok(())
    }

    /// Non-success status becomes a RemoteApi error carrying the body verbatim
    async fn handle_response(&self, response: Response) -> Result<Value, ClientError> {
        let status = response.status().as_u16();
        let response_text = response
            .text()
            .await
            .map_err(|e| ClientError::network(SERVICE, format!("Failed to read response: {}", e)))?;

        if !(200..300).contains(&status) {
            return Err(ClientError::remote_api(SERVICE, status, response_text));
        }

        serde_json::from_str(&response_text)
            .map_err(|e| ClientError::serialization(SERVICE, format!("Failed to parse JSON: {}", e)))
    }
}
