//! # CardHub Gateway
//!
//! Membership-application gateway for the CardHub board. A visitor submits a
//! user id and a justification; the gateway optionally signs the visitor in
//! through Linux.do CONNECT, optionally auto-approves the request against the
//! Linux.do group-membership API, and always notifies the administrator over
//! Telegram.
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use cardhub_gateway::server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     server::run_server().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod clients;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use auth::{Session, SessionManager};
pub use clients::{ClientError, ConnectClient, DiscourseClient, TelegramClient};
pub use core::application::{
    ApplicationFormState, ApplicationHandler, ApplicationRequest, ApplicationStatus,
    ApprovalPolicy,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
