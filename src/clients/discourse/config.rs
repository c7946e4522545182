//! Linux.do Configuration
//!
//! Static administrator credentials: session cookie, CSRF token and the
//! user-agent the session was issued for. The service acts with these on the
//! visitor's behalf, not with the visitor's own OAuth token.

use std::env;

/// Configuration for the Linux.do group membership client
#[derive(Debug, Clone)]
pub struct DiscourseConfig {
    /// Administrator session cookie
    pub cookie: Option<String>,
    /// CSRF token paired with the cookie
    pub csrf_token: Option<String>,
    /// User-agent the session cookie was issued for
    pub user_agent: Option<String>,
    /// Base URL
    pub base_url: String,
}

impl Default for DiscourseConfig {
    fn default() -> Self {
        Self {
            cookie: None,
            csrf_token: None,
            user_agent: None,
            base_url: "https://linux.do".to_string(),
        }
    }
}

impl DiscourseConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.cookie = env::var("LINUX_DO_COOKIE").ok();
        config.csrf_token = env::var("LINUX_DO_CSRF_TOKEN").ok();
        config.user_agent = env::var("LINUX_DO_USER_AGENT").ok();

        if let Ok(base_url) = env::var("LINUX_DO_BASE_URL") {
            config.base_url = base_url;
        }

        config
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    pub fn with_csrf_token(mut self, csrf_token: impl Into<String>) -> Self {
        self.csrf_token = Some(csrf_token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Group members endpoint for a group id
    pub fn group_members_url(&self, group_id: &str) -> String {
        format!(
            "{}/groups/{}/members.json",
            self.base_url.trim_end_matches('/'),
            group_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiscourseConfig::default();
        assert_eq!(config.base_url, "https://linux.do");
        assert!(config.cookie.is_none());
        assert!(config.csrf_token.is_none());
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_group_members_url() {
        let config = DiscourseConfig::default().with_base_url("https://linux.do/");
        assert_eq!(
            config.group_members_url("42"),
            "https://linux.do/groups/42/members.json"
        );
    }
}
