//! Message handler implementation.

use tracing::{error, info, warn};

use super::types::{BotCommand, CommandResult, IncomingMessage};
use crate::weather::{CityQuery, WeatherClient, WeatherError};

/// Reply when the weather API answers with anything but 200.
pub const BAD_STATUS_REPLY: &str =
    "Could not retrieve weather data. Please check that the city name is correct.";

/// Reply when the weather API does not answer in time.
pub const TIMEOUT_REPLY: &str = "The weather service took too long to respond. Please try again.";

/// Reply for any other failure while fetching the weather.
pub const GENERIC_FAILURE_REPLY: &str =
    "An error occurred while retrieving weather data. Please try again later.";

/// Greeting sent in response to `/start`.
#[must_use]
pub fn greeting(display_name: &str) -> String {
    format!("Hello, {display_name}!\nSend me the name of a city to get the current weather.")
}

/// Turns incoming messages into replies.
///
/// Holds no per-chat state, so one instance serves every chat.
#[derive(Debug, Clone)]
pub struct MessageHandler {
    /// Client for the weather API.
    weather: WeatherClient,

    /// Our own username, to tell `/start@us` from `/start@someone_else`.
    bot_username: Option<String>,
}

impl MessageHandler {
    /// Creates a new message handler.
    #[must_use]
    pub fn new(weather: WeatherClient) -> Self {
        Self {
            weather,
            bot_username: None,
        }
    }

    /// Only treats `/command@name` mentions of this username as commands.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Handles a message and produces the reply.
    ///
    /// Never fails: every error is turned into a user-facing reply.
    pub async fn handle(&self, message: &IncomingMessage) -> CommandResult {
        match BotCommand::parse(&message.text, self.bot_username.as_deref()) {
            Some(command) => Self::execute(command, message),
            None => self.handle_weather(message).await,
        }
    }

    fn execute(command: BotCommand, message: &IncomingMessage) -> CommandResult {
        match command {
            BotCommand::Start => Self::handle_start(command, message),
        }
    }

    fn handle_start(command: BotCommand, message: &IncomingMessage) -> CommandResult {
        info!(
            "Received {command} from user {} ({})",
            message.sender_id, message.sender_display_name
        );
        CommandResult::success(greeting(&message.sender_display_name))
    }

    async fn handle_weather(&self, message: &IncomingMessage) -> CommandResult {
        let city = CityQuery::parse(&message.text);
        info!(
            "Weather request for city '{}' from user {}",
            city, message.sender_id
        );
        if city.is_empty() {
            warn!("Empty city query from user {}", message.sender_id);
        }

        match self.weather.current_weather(&city).await {
            Ok(report) => {
                info!("Weather for {} retrieved successfully", city.display_name());
                CommandResult::success(report.summary(&city))
            }
            Err(WeatherError::BadStatus(code)) => {
                warn!("Failed to get weather for city '{city}', API status code: {code}");
                CommandResult::error(BAD_STATUS_REPLY)
            }
            Err(WeatherError::Timeout) => {
                error!("Timed out fetching weather for city '{city}'");
                CommandResult::error(TIMEOUT_REPLY)
            }
            Err(e) => {
                error!("Error fetching weather for city '{city}': {e}");
                CommandResult::error(GENERIC_FAILURE_REPLY)
            }
        }
    }
}
