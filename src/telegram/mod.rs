//! Telegram client wrapper module.
//!
//! Connects to the Bot API, long-polls for messages and sends replies.

mod client;

pub use client::{TelegramBot, TelegramError};
