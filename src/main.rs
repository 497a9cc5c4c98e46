//! Weather Bot - Main Entry Point
//!
//! A Telegram bot that replies to a city name with the current weather.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use weather_bot::commands::MessageHandler;
use weather_bot::config::{LogSettings, TelegramConfig, WeatherConfig};
use weather_bot::telegram::TelegramBot;
use weather_bot::weather::WeatherClient;

/// Telegram bot that replies with the current weather for a city.
#[derive(Parser, Debug)]
#[command(name = "weather_bot")]
#[command(about = "Reply to a city name with the current weather")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to the log file.
    #[arg(long, default_value = "bot.log")]
    log_file: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Keep the guard alive so buffered lines reach the log file on exit
    let _log_guard = init_logging(&LogSettings::new(&args.log_level, &args.log_file));

    info!("Bot started");

    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let tg_config = TelegramConfig::from_env()
        .context("Failed to load Telegram configuration from environment")?;
    let weather_config = WeatherConfig::from_env()
        .context("Failed to load weather API configuration from environment")?;

    let weather = WeatherClient::new(weather_config).context("Failed to create weather client")?;

    info!("Starting bot in long-polling mode");
    let bot = match start(&tg_config).await {
        Ok(bot) => bot,
        Err(e) => {
            error!("Critical error while starting the bot: {:#}", e);
            return Err(e);
        }
    };

    let handler = Arc::new(MessageHandler::new(weather).with_bot_username(bot.username()));

    info!("Bot @{} is running. Use Ctrl+C to stop.", bot.username());
    bot.run(handler).await;

    info!("Shutting down...");
    Ok(())
}

/// Connects to Telegram and discards updates received while offline.
async fn start(config: &TelegramConfig) -> Result<TelegramBot> {
    let bot = TelegramBot::connect(config)
        .await
        .context("Failed to connect to Telegram")?;

    bot.skip_pending_updates()
        .await
        .context("Failed to drop pending updates")?;

    Ok(bot)
}

/// Initializes logging to stdout and the log file.
fn init_logging(settings: &LogSettings) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper=warn,reqwest=warn", settings.level)));

    let file_appender = tracing_appender::rolling::never(settings.directory(), settings.file_name());
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false);

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
