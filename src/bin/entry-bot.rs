//! Levelwatch entry bot
//!
//! Loads candle history once, then answers `long|short <price> <symbol>`
//! commands posted to the notification inbox with stop-loss and
//! take-profit levels.

use std::sync::Arc;

use dotenvy::dotenv;
use levelwatch::config::{get_environment, Config};
use levelwatch::core::listener::CommandListener;
use levelwatch::logging;
use levelwatch::services::binance::{BinanceMarketDataProvider, BinanceRestClient};
use levelwatch::services::{load_symbols, PushbulletNotifier};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = get_environment();
    info!("Starting Levelwatch entry bot");
    info!(environment = %env, "Environment");

    let config = Config::from_env()?;

    let symbols = load_symbols(&config.symbols_file)?;
    if symbols.is_empty() {
        warn!(
            file = %config.symbols_file.display(),
            "No symbols configured, every command will report missing data"
        );
    }

    let client = BinanceRestClient::new(&config.binance_base_url, config.http_timeout)?;
    let provider = BinanceMarketDataProvider::new(client);
    let history = CommandListener::preload(
        &provider,
        &symbols,
        &config.candle_interval,
        config.candle_limit,
    )
    .await;

    let notifier = Arc::new(PushbulletNotifier::new(
        &config.pushbullet_base_url,
        &config.pushbullet_token,
        config.http_timeout,
        config.symbol_channels.clone(),
    )?);
    let listener = CommandListener::new(notifier, history, config.levels, config.entry);

    tokio::select! {
        _ = listener.run(config.listen_interval) => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping entry bot...");
        }
    }

    info!("Entry bot shut down");
    Ok(())
}
