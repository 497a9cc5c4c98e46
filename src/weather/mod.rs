//! Weather lookup module.
//!
//! Normalizes city names, queries the current weather API and turns the
//! response into a short report.

mod client;
mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::{WeatherClient, WeatherError};
pub use types::{CityQuery, WeatherReport};
