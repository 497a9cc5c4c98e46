//! Configuration module for the weather bot.
//!
//! Handles loading and validation of the Telegram and weather API
//! settings from the process environment.

mod settings;

pub use settings::{ConfigError, LogSettings, TelegramConfig, WeatherConfig};

/// Default endpoint of the current weather API.
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Default timeout for a single weather request, in seconds.
pub const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 20;
