//! Linux.do Client
//!
//! Single batch "add usernames to group" call; no retry, platform default
//! timeouts.

use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;
use url::form_urlencoded;

use crate::clients::ClientError;

use super::config::DiscourseConfig;

const SERVICE: &str = "discourse";

/// Linux.do group membership client
#[derive(Debug, Clone)]
pub struct DiscourseClient {
    config: DiscourseConfig,
    http_client: Client,
}

impl DiscourseClient {
    pub fn new(config: DiscourseConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Shared connection pool from the caller
    pub fn with_http_client(config: DiscourseConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Add usernames to a group
    ///
    /// Requires the cookie, CSRF token and user-agent to all be configured;
    /// the first missing one is reported before any network call. A
    /// non-success status from the platform becomes `ClientError::RemoteApi`,
    /// which the application handler treats as a hard rejection.
    pub async fn approve_group_member(
        &self,
        usernames: &[String],
        group_id: &str,
    ) -> Result<Value, ClientError> {
        let cookie = self.config.cookie.as_deref().ok_or_else(|| {
            ClientError::configuration(SERVICE, "Linux.do 凭证未配置，请联系管理员设置 LINUX_DO_COOKIE")
        })?;
        let csrf_token = self.config.csrf_token.as_deref().ok_or_else(|| {
            ClientError::configuration(SERVICE, "Linux.do 凭证未配置，请联系管理员设置 LINUX_DO_CSRF_TOKEN")
        })?;
        let user_agent = self.config.user_agent.as_deref().ok_or_else(|| {
            ClientError::configuration(SERVICE, "Linux.do 凭证未配置，请联系管理员设置 LINUX_DO_USER_AGENT")
        })?;

        let url = self.config.group_members_url(group_id);
        let body = Self::encode_body(usernames);
        debug!(group_id, count = usernames.len(), "Approving group members");

        let response = self
            .http_client
            .put(&url)
            .header(
                "content-type",
                "application/x-www-form-urlencoded; charset=UTF-8",
            )
            .header("x-csrf-token", csrf_token)
            .header("x-requested-with", "XMLHttpRequest")
            .header("cookie", cookie)
            .header("user-agent", user_agent)
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::network(SERVICE, format!("Network error: {}", e)))?;

        self.handle_response(response).await
    }

    /// Form body: comma-joined usernames, url-encoded, always notifying users
    fn encode_body(usernames: &[String]) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("usernames", &usernames.join(","))
            .append_pair("notify_users", "true")
            .finish()
    }

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
