//! Telegram notification client
//!
//! Sends administrator notifications through the Telegram Bot API.

pub mod client;
pub mod config;

pub use client::{ParseMode, SendMessage, TelegramClient};
pub use config::TelegramConfig;
