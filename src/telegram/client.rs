//! Telegram Bot API wrapper: connection check, long-polling and replies.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ReplyParameters;
use teloxide::RequestError;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::commands::{IncomingMessage, MessageHandler};
use crate::config::TelegramConfig;

/// Errors that can occur while talking to the Bot API.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API request failed: {0}")]
    Request(String),
}

impl From<RequestError> for TelegramError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Network(_) | RequestError::Io(_) => Self::Connection(err.to_string()),
            _ => Self::Request(err.to_string()),
        }
    }
}

/// High-level Telegram bot wrapper.
pub struct TelegramBot {
    /// The underlying Bot API client.
    bot: Bot,

    /// Username the token belongs to.
    username: String,
}

impl TelegramBot {
    /// Connects to the Bot API and verifies the token.
    pub async fn connect(config: &TelegramConfig) -> Result<Self, TelegramError> {
        info!("Connecting to Telegram...");

        let bot = Bot::new(&config.bot_token);
        let me = bot.get_me().await?;
        let username = me.user.username.clone().unwrap_or_else(|| me.user.first_name.clone());

        info!("Connected to Telegram as @{}", username);

        Ok(Self { bot, username })
    }

    /// Username of the bot account.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Drops updates that queued up while the bot was offline.
    pub async fn skip_pending_updates(&self) -> Result<(), TelegramError> {
        debug!("Dropping pending updates...");
        self.bot.delete_webhook().drop_pending_updates(true).await?;
        Ok(())
    }

    /// Runs the long-polling loop until Ctrl+C.
    ///
    /// Each text message is passed to `handler` and the reply is sent back
    /// as a response to the original message.
    pub async fn run(&self, handler: Arc<MessageHandler>) {
        let tree = Update::filter_message().endpoint(on_message);

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), tree)
            .dependencies(dptree::deps![handler])
            .default_handler(|_update| async {
                debug!("Ignoring non-message update");
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .build();

        let shutdown = dispatcher.shutdown_token();
        let signal_task = tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl+C: {}", e);
                return;
            }

            info!("Received Ctrl+C, shutting down...");
            match shutdown.shutdown() {
                Ok(stopped) => stopped.await,
                Err(_) => debug!("Dispatcher was idle at shutdown"),
            }
        });

        info!("Starting long-polling");
        dispatcher.dispatch().await;

        signal_task.abort();
        info!("Long-polling stopped");
    }
}

impl std::fmt::Debug for TelegramBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramBot")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Dispatcher endpoint for every incoming message.
async fn on_message(bot: Bot, msg: Message, handler: Arc<MessageHandler>) -> ResponseResult<()> {
    let Some(incoming) = to_incoming(&msg) else {
        debug!("Skipping non-text message {} in chat {}", msg.id.0, msg.chat.id.0);
        return Ok(());
    };

    let result = handler.handle(&incoming).await;

    if let Err(e) = bot
        .send_message(msg.chat.id, result.message)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await
    {
        warn!("Failed to send reply to chat {}: {}", msg.chat.id.0, e);
    }

    Ok(())
}

/// Extracts sender and text; `None` for messages without either.
fn to_incoming(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let sender = msg.from.as_ref()?;

    Some(IncomingMessage::new(
        sender.id.0,
        sender.first_name.clone(),
        text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(json: &str) -> Message {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_to_incoming_text_message() {
        let msg = message(
            r#"{
                "message_id": 10,
                "date": 1700000000,
                "chat": {"id": 555, "type": "private", "first_name": "Alice"},
                "from": {"id": 555, "is_bot": false, "first_name": "Alice"},
                "text": " Paris "
            }"#,
        );

        let incoming = to_incoming(&msg).unwrap();
        assert_eq!(incoming, IncomingMessage::new(555, "Alice", " Paris "));
    }

    #[test]
    fn test_to_incoming_skips_non_text() {
        let msg = message(
            r#"{
                "message_id": 11,
                "date": 1700000000,
                "chat": {"id": 555, "type": "private", "first_name": "Alice"},
                "from": {"id": 555, "is_bot": false, "first_name": "Alice"},
                "location": {"longitude": 2.35, "latitude": 48.85}
            }"#,
        );

        assert!(to_incoming(&msg).is_none());
    }

    #[test]
    fn test_request_error_conversion() {
        let err: TelegramError = RequestError::Api(teloxide::ApiError::InvalidToken).into();
        assert!(matches!(err, TelegramError::Request(_)));
    }
}
