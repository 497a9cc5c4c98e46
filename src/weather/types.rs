//! City queries, weather reports and the API response shape.

use std::fmt;

use serde::Deserialize;
use serde_json::Number;

/// A normalized city name used as the weather lookup key.
///
/// Normalization trims surrounding whitespace and lowercases the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    /// Normalizes raw message text into a city query.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(text.trim().to_lowercase())
    }

    /// The normalized name, as sent to the API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the query is empty after normalization.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name for display: first character uppercased.
    ///
    /// Only the first word is affected, so `"new york"` becomes `"New york"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        capitalize(&self.0)
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Temperature in degrees Celsius, as the API wrote it (`21`, `18.5`).
    pub temperature: Number,

    /// Human-readable conditions, e.g. "clear sky".
    pub description: String,
}

impl WeatherReport {
    /// Formats the reply sent back to the user.
    #[must_use]
    pub fn summary(&self, city: &CityQuery) -> String {
        format!(
            "Weather in {}: Temperature: {}°C, Conditions: {}",
            city.display_name(),
            self.temperature,
            capitalize(&self.description),
        )
    }
}

/// Subset of the current weather API response that the bot reads.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentWeatherResponse {
    pub main: MainBlock,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainBlock {
    pub temp: Number,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Condition {
    pub description: String,
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
