//! CONNECT Client
//!
//! Authorization-code exchange plus userinfo fetch. Token or userinfo failure
//! propagates to the caller; no retry.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::Session;
use crate::clients::ClientError;

use super::config::ConnectConfig;

const SERVICE: &str = "connect";

/// Token endpoint response, only the fields the exchange needs
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Linux.do CONNECT OIDC client
#[derive(Debug, Clone)]
pub struct ConnectClient {
    config: ConnectConfig,
    http_client: Client,
}

impl ConnectClient {
    pub fn new(config: ConnectConfig) -> Self {
        Self {
            config,
            http_client: Client::new(),
        }
    }

    /// Shared connection pool from the caller
    pub fn with_http_client(config: ConnectConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Authorization URL for the login redirect
    pub fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<String, ClientError> {
        let client_id = self.client_id()?;
        let mut url = Url::parse(&self.config.authorize_endpoint())
            .map_err(|e| ClientError::configuration(SERVICE, format!("Invalid issuer URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", "openid profile email")
            .append_pair("state", state);
        Ok(url.into())
    }

    /// Exchange an authorization code and fetch the visitor profile
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<Session, ClientError> {
        let access_token = self.fetch_access_token(code, redirect_uri).await?;
        let claims = self.fetch_userinfo(&access_token).await?;
        Ok(Self::map_claims(&claims))
    }

    async fn fetch_access_token(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<String, ClientError> {
        let client_id = self.client_id()?;
        let client_secret = self.config.client_secret.as_deref().ok_or_else(|| {
            ClientError::configuration(SERVICE, "LINUX_DO_CLIENT_SECRET is required")
        })?;

        debug!("Exchanging authorization code");
        let response = self
            .http_client
            .post(self.config.token_endpoint())
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| ClientError::network(SERVICE, format!("Network error: {}", e)))?;

        let body: TokenResponse = serde_json::from_value(self.handle_response(response).await?)
            .map_err(|e| {
                ClientError::serialization(SERVICE, format!("Invalid token response: {}", e))
            })?;
        Ok(body.access_token)
    }

    async fn fetch_userinfo(&self, access_token: &str) -> Result<Value, ClientError> {
        debug!("Fetching userinfo");
        let response = self
            .http_client
            .get(self.config.userinfo_endpoint())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ClientError::network(SERVICE, format!("Network error: {}", e)))?;

        self.handle_response(response).await
    }

    /// Map userinfo claims into a session record
    ///
    /// CONNECT may return the claims flat or wrapped in a `user` envelope;
    /// both shapes are accepted.
    fn map_claims(claims: &Value) -> Session {
        let claims = claims.get("user").unwrap_or(claims);

        let string_claim = |key: &str| {
            claims
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        let subject_id = claims
            .get("sub")
            .or_else(|| claims.get("id"))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();

        let username = string_claim("username");
        let display_name = string_claim("name").or_else(|| username.clone());

        Session {
            subject_id,
            display_name,
            email: string_claim("email"),
            avatar_url: string_claim("avatar_url"),
            username,
            trust_level: claims
                .get("trust_level")
                .and_then(|v| v.as_u64())
                .map(|v| v as u8),
        }
    }

    fn client_id(&self) -> Result<&str, ClientError> {
        self.config
            .client_id
            .as_deref()
            .ok_or_else(|| ClientError::configuration(SERVICE, "LINUX_DO_CLIENT_ID is required"))
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authorize_url() {
        let client = ConnectClient::new(
            ConnectConfig::default()
                .with_client_id("cid")
                .with_client_secret("secret"),
        );
        let url = client
            .authorize_url("https://example.com/auth/callback", "nonce123")
            .unwrap();
        assert!(url.starts_with("https://connect.linux.do/oauth2/authorize?"));
        assert!(url.contains("client_id=cid"));
        assert!(url.contains("scope=openid+profile+email"));
        assert!(url.contains("state=nonce123"));
    }

    #[test]
    fn test_authorize_url_requires_client_id() {
        let client = ConnectClient::new(ConnectConfig::default());
        let err = client.authorize_url("https://example.com/cb", "s").unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn test_map_flat_claims() {
        let claims = json!({
            "sub": "12345",
            "name": "Alice",
            "username": "alice",
            "email": "alice@example.com",
            "avatar_url": "https://linux.do/a.png",
            "trust_level": 3
        });
        let session = ConnectClient::map_claims(&claims);
        assert_eq!(session.subject_id, "12345");
        assert_eq!(session.display_name.as_deref(), Some("Alice"));
        assert_eq!(session.username.as_deref(), Some("alice"));
        assert_eq!(session.trust_level, Some(3));
    }

    #[test]
    fn test_map_enveloped_claims_falls_back_to_username() {
        let claims = json!({
            "user": {
                "id": 67890,
                "username": "bob",
                "trust_level": 1
            }
        });
        let session = ConnectClient::map_claims(&claims);
        assert_eq!(session.subject_id, "67890");
        // Missing name falls back to the username
        assert_eq!(session.display_name.as_deref(), Some("bob"));
        assert_eq!(session.trust_level, Some(1));
        assert!(session.email.is_none());
    }
}
