//! Application request and result types

use serde::{Deserialize, Serialize};

/// One form submission, created transiently per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRequest {
    /// Forum username of the applicant
    pub user_id: String,
    /// Free-text justification
    pub reason: String,
    /// Whether the visitor signed in through CONNECT
    pub is_authenticated: bool,
    /// Trust level claimed by the identity provider
    pub trust_level: Option<u8>,
}

/// Result kind of one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Idle,
    Success,
    Error,
}

/// Terminal value of one handler invocation, returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationFormState {
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApplicationFormState {
    pub fn idle() -> Self {
        Self {
            status: ApplicationStatus::Idle,
            message: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ApplicationStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ApplicationStatus::Error,
            message: Some(message.into()),
        }
    }
}
