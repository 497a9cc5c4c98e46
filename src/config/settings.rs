//! Application settings for Telegram, the weather API and logging.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{DEFAULT_WEATHER_API_URL, DEFAULT_WEATHER_TIMEOUT_SECS};

/// Telegram Bot API configuration.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token issued by `@BotFather`.
    pub bot_token: String,
}

impl TelegramConfig {
    /// Creates a new Telegram configuration.
    #[must_use]
    pub fn new(bot_token: String) -> Self {
        Self { bot_token }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `TELEGRAM_TOKEN` to be set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bot_token = required(&lookup, "TELEGRAM_TOKEN")?;
        Ok(Self { bot_token })
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

/// Weather API configuration.
#[derive(Clone)]
pub struct WeatherConfig {
    /// API key sent as the `appid` query parameter.
    pub api_key: String,

    /// Endpoint of the current weather API.
    pub api_url: String,

    /// Timeout for a single request.
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Creates a configuration with the default endpoint and timeout.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_WEATHER_API_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_WEATHER_TIMEOUT_SECS),
        }
    }

    /// Overrides the API endpoint.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `WEATHER_API_KEY` to be set. `WEATHER_API_URL` and
    /// `WEATHER_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new(required(&lookup, "WEATHER_API_KEY")?);

        if let Some(url) = lookup("WEATHER_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_owned();
        }

        if let Some(raw) = lookup("WEATHER_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

impl fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Where and how verbosely to log.
#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is not set.
    pub level: String,

    /// Path of the log file.
    pub file: PathBuf,
}

impl LogSettings {
    /// Creates log settings.
    #[must_use]
    pub fn new(level: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            file: file.into(),
        }
    }

    /// Directory holding the log file.
    #[must_use]
    pub fn directory(&self) -> &Path {
        match self.file.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    /// File name of the log file.
    #[must_use]
    pub fn file_name(&self) -> &OsStr {
        self.file.file_name().unwrap_or_else(|| OsStr::new("bot.log"))
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self::new("info", "bot.log")
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingEnvVar(key))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid WEATHER_TIMEOUT_SECS value {0:?} (must be a positive integer)")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_owned())
    }

    #[test]
    fn test_telegram_config_from_lookup() {
        let config = TelegramConfig::from_lookup(lookup(&[("TELEGRAM_TOKEN", " 123:abc ")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
    }

    #[test]
    fn test_telegram_config_missing_token() {
        let err = TelegramConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar("TELEGRAM_TOKEN")));

        let err = TelegramConfig::from_lookup(lookup(&[("TELEGRAM_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar("TELEGRAM_TOKEN")));
    }

    #[test]
    fn test_weather_config_defaults() {
        let config = WeatherConfig::from_lookup(lookup(&[("WEATHER_API_KEY", "key")])).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_url, DEFAULT_WEATHER_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_weather_config_overrides() {
        let config = WeatherConfig::from_lookup(lookup(&[
            ("WEATHER_API_KEY", "key"),
            ("WEATHER_API_URL", "http://127.0.0.1:8080/weather"),
            ("WEATHER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:8080/weather");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_weather_config_rejects_bad_timeout() {
        for raw in ["0", "-3", "soon"] {
            let err = WeatherConfig::from_lookup(lookup(&[
                ("WEATHER_API_KEY", "key"),
                ("WEATHER_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout(ref v) if v == raw));
        }
    }

    #[test]
    fn test_weather_config_missing_key() {
        let err = WeatherConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar("WEATHER_API_KEY")));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let tg = format!("{:?}", TelegramConfig::new("secret-token".to_owned()));
        let weather = format!("{:?}", WeatherConfig::new("secret-key".to_owned()));
        assert!(!tg.contains("secret-token"));
        assert!(!weather.contains("secret-key"));
        assert!(weather.contains("openweathermap"));
    }

    #[test]
    fn test_log_settings_paths() {
        let settings = LogSettings::default();
        assert_eq!(settings.directory(), Path::new("."));
        assert_eq!(settings.file_name(), "bot.log");

        let settings = LogSettings::new("debug", "logs/weather.log");
        assert_eq!(settings.directory(), Path::new("logs"));
        assert_eq!(settings.file_name(), "weather.log");
    }
}
