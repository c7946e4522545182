//! Session token handling
//!
//! This module provides session creation and verification on top of a signed
//! JWT cookie.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::utils::error::{GatewayError, Result};

/// One authenticated visit, as mapped from the CONNECT userinfo claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Identity provider subject id
    pub subject_id: String,
    /// Display name (falls back to the username upstream)
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// Forum username, used as the application user id
    pub username: Option<String>,
    /// Standing rank assigned by the identity provider
    pub trust_level: Option<u8>,
}

/// Signed cookie claims wrapping a Session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity provider user id)
    pub sub: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Session payload
    #[serde(flatten)]
    pub session: Session,
}

/// Session token manager for cookie operations
#[derive(Clone)]
pub struct SessionManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    /// Token lifetime in seconds
    expiration: u64,
    issuer: String,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl SessionManager {
    /// Default session lifetime: 30 days, matching the upstream sign-in
    pub const DEFAULT_EXPIRATION: u64 = 30 * 24 * 60 * 60;

    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            expiration: Self::DEFAULT_EXPIRATION,
            issuer: "cardhub-gateway".to_string(),
        }
    }

    pub fn with_expiration(mut self, expiration: u64) -> Self {
        self.expiration = expiration;
        self
    }

    /// Issue a signed session token
    pub fn issue_token(&self, session: &Session) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| GatewayError::Internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = SessionClaims {
            sub: session.subject_id.clone(),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            session: session.clone(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key).map_err(GatewayError::Jwt)?;
        debug!(sub = %claims.sub, "Issued session token");
        Ok(token)
    }

    /// Verify a token and recover the session
    pub fn verify_token(&self, token: &str) -> Result<Session> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(GatewayError::Jwt)?;
        Ok(token_data.claims.session)
    }
}
