//! Command types and definitions.

use std::fmt;

/// A text message delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Telegram user ID of the sender.
    pub sender_id: u64,

    /// Sender's first name, used to address them.
    pub sender_display_name: String,

    /// Raw message text.
    pub text: String,
}

impl IncomingMessage {
    /// Creates a new incoming message.
    #[must_use]
    pub fn new(sender_id: u64, sender_display_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender_id,
            sender_display_name: sender_display_name.into(),
            text: text.into(),
        }
    }
}

/// Available bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// Greet the user and explain how to ask for the weather.
    Start,
}

impl BotCommand {
    /// Parses a command from a message text.
    ///
    /// Accepts `/start` as well as the `/start@BotName` form Telegram uses in
    /// group chats. A mention of any bot other than `bot_username` is not a
    /// command for us. Any arguments after the command word are ignored.
    ///
    /// Returns `None` if the message is not a known command.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let text = text.trim();
        let command = text.strip_prefix('/')?;

        let word = command.split_whitespace().next()?;
        let name = match word.split_once('@') {
            Some((name, mention)) => {
                let ours = bot_username.is_none_or(|own| own.eq_ignore_ascii_case(mention));
                if !ours {
                    return None;
                }
                name
            }
            None => word,
        };

        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            _ => None,
        }
    }

    /// Returns the command name as typed by users.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
        }
    }
}

impl fmt::Display for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// Outcome of handling a message.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the request was served.
    pub success: bool,

    /// Reply to send back to the user.
    pub message: String,
}

impl CommandResult {
    /// Creates a successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Creates an error result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
