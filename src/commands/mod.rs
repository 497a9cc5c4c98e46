//! Command handling module.
//!
//! Turns incoming Telegram messages into replies: `/start` gets a greeting,
//! any other text is looked up as a city name.

mod handler;
mod types;

pub use handler::{
    greeting, MessageHandler, BAD_STATUS_REPLY, GENERIC_FAILURE_REPLY, TIMEOUT_REPLY,
};
pub use types::{BotCommand, CommandResult, IncomingMessage};
