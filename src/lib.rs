//! Weather Bot Library
//!
//! A Telegram bot that answers a city name with the current weather.
//!
//! This crate provides the core functionality for:
//! - Loading configuration from the environment
//! - Querying the current weather API with a bounded timeout
//! - Turning chat messages into replies
//! - Long-polling the Telegram Bot API

pub mod commands;
pub mod config;
pub mod telegram;
pub mod weather;
