//! Linux.do group membership client
//!
//! Adds approved usernames to the target board group with administrator-level
//! platform credentials.

pub mod client;
pub mod config;

pub use client::DiscourseClient;
pub use config::DiscourseConfig;
