mod config;
mod extract;
mod handler;
mod platform;
mod reply;
mod resolver;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::handler::MessageHandler;
use crate::resolver::ParseApiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,douyinbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Parse API: {}", config.resolver.api_url);
    info!("  Group whitelist: {:?}", config.access.group_whitelist);
    info!("  Private chats enabled: {}", config.access.enable_in_private);

    // One shared HTTP client for all resolution calls
    let resolver = Arc::new(ParseApiClient::new(config.resolver.clone())?);

    let bot_token = config.telegram.bot_token.clone();
    let handler = Arc::new(MessageHandler::new(config, resolver));

    // Run the Telegram bot
    info!("Bot is starting...");
    platform::telegram::run(handler, &bot_token).await?;

    Ok(())
}
