//! Linux.do CONNECT identity client
//!
//! OIDC authorization-code exchange and userinfo fetch against the fixed
//! CONNECT issuer.

pub mod client;
pub mod config;

pub use client::ConnectClient;
pub use config::ConnectConfig;
