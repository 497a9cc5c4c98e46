//! HTTP client for the current weather API.

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, info};

use super::types::{CityQuery, CurrentWeatherResponse, WeatherReport};
use crate::config::WeatherConfig;

/// Errors that can occur while fetching the weather.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather API did not respond in time")]
    Timeout,

    #[error("Weather API returned status {0}")]
    BadStatus(u16),

    #[error("Failed to parse weather API response: {0}")]
    Parse(String),

    #[error("Weather API request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout;
        }

        // The URL carries the API key.
        Self::Request(err.without_url().to_string())
    }
}

/// Client for the current weather endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Creates a client whose requests are bounded by the configured timeout.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(WeatherError::from)?;

        info!(
            "Weather client ready (endpoint: {}, timeout: {:?})",
            config.api_url, config.timeout
        );

        Ok(Self { http, config })
    }

    /// Fetches the current weather for a city, in metric units.
    pub async fn current_weather(&self, city: &CityQuery) -> Result<WeatherReport, WeatherError> {
        debug!("Requesting current weather for {city}");

        let response = self
            .http
            .get(&self.config.api_url)
            .query(&[
                ("q", city.as_str()),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WeatherError::BadStatus(status.as_u16()));
        }

        let body = response.text().await?;
        parse_report(&body)
    }
}

/// Extracts the temperature and first condition from a response body.
fn parse_report(body: &str) -> Result<WeatherReport, WeatherError> {
    let response: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::Parse("response has no weather conditions".to_owned()))?;

    Ok(WeatherReport {
        temperature: response.main.temp,
        description: condition.description,
    })
}
