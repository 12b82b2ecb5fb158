//! Levelwatch signal bot
//!
//! Polls the exchange for every configured instrument, predicts the next
//! move, charts it and pushes the signal.

use std::sync::Arc;

use dotenvy::dotenv;
use levelwatch::config::{get_environment, Config};
use levelwatch::core::runtime::{RuntimeConfig, SignalRuntime};
use levelwatch::jobs::context::JobContext;
use levelwatch::logging;
use levelwatch::services::binance::{BinanceMarketDataProvider, BinanceRestClient};
use levelwatch::services::{PngChartRenderer, PushbulletNotifier};
use levelwatch::signals::DirectionClassifier;
use levelwatch::storage::FileModelStore;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = get_environment();
    info!("Starting Levelwatch signal bot");
    info!(environment = %env, "Environment");

    let config = Config::from_env()?;

    let client = BinanceRestClient::new(&config.binance_base_url, config.http_timeout)?;
    let provider = Arc::new(BinanceMarketDataProvider::new(client));
    let store = Arc::new(FileModelStore::new(&config.model_dir)?);
    let renderer = Arc::new(PngChartRenderer::new(&config.image_dir)?);
    let notifier = Arc::new(PushbulletNotifier::new(
        &config.pushbullet_base_url,
        &config.pushbullet_token,
        config.http_timeout,
        config.symbol_channels.clone(),
    )?);

    info!(
        models = %config.model_dir.display(),
        images = %config.image_dir.display(),
        interval = %config.candle_interval,
        limit = config.candle_limit,
        "Signal bot configured"
    );

    let context = JobContext::new(provider, DirectionClassifier::new(store), renderer, notifier)
        .with_levels(config.levels)
        .with_candles(&config.candle_interval, config.candle_limit);

    let runtime = SignalRuntime::new(
        RuntimeConfig {
            poll_interval: config.poll_interval,
            symbols_file: config.symbols_file.clone(),
        },
        Arc::new(context),
    );

    tokio::select! {
        _ = runtime.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received, stopping signal bot...");
        }
    }

    info!("Signal bot shut down");
    Ok(())
}
