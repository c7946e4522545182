//! Clients for the three upstream services
//!
//! Single error type for all upstream clients - optimized design for simplicity
//! and a single branching point in the application handler.
//!
//! | Variant | Purpose | Retryable by the visitor |
//! |------|------|--------|
//! | Configuration | A credential or setting is missing | No |
//! | RemoteApi | The remote service rejected the call | Yes (later) |
//! | Network | The remote service could not be reached | Yes |
//! | Serialization | The response body could not be decoded | No |

pub mod connect;
pub mod discourse;
pub mod telegram;

pub use connect::ConnectClient;
pub use discourse::DiscourseClient;
pub use telegram::TelegramClient;

/// Unified error type for the upstream clients
///
/// The application handler branches on the `RemoteApi` variant to distinguish
/// "the remote platform itself rejected the call" from "the call never got
/// through", so the variants are part of the contract, not just diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    #[error("Configuration error for {service}: {message}")]
    Configuration {
        service: &'static str,
        message: String,
    },

    #[error("API error for {service} (status {status}): {body}")]
    RemoteApi {
        service: &'static str,
        status: u16,
        /// Response body text, preserved verbatim for logging
        body: String,
    },

    #[error("Network error for {service}: {message}")]
    Network {
        service: &'static str,
        message: String,
    },

    #[error("Serialization error for {service}: {message}")]
    Serialization {
        service: &'static str,
        message: String,
    },
}

impl ClientError {
    pub fn configuration(service: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            service,
            message: message.into(),
        }
    }

    pub fn remote_api(service: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::RemoteApi {
            service,
            status,
            body: body.into(),
        }
    }

    pub fn network(service: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            service,
            message: message.into(),
        }
    }

    pub fn serialization(service: &'static str, message: impl Into<String>) -> Self {
        Self::Serialization {
            service,
            message: message.into(),
        }
    }

    /// Whether the remote service itself rejected the call
    pub fn is_remote_rejection(&self) -> bool {
        matches!(self, Self::RemoteApi { .. })
    }

    /// Service name the error originated from
    pub fn service(&self) -> &'static str {
        match self {
            Self::Configuration { service, .. }
            | Self::RemoteApi { service, .. }
            | Self::Network { service, .. }
            | Self::Serialization { service, .. } => service,
        }
    }
}
