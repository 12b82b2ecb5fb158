//! Environment-driven configuration.
//!
//! Every setting is read from the process environment (optionally seeded from
//! a `.env` file by the binaries). Only the notification token is required.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::indicators::structure::{LevelConfig, ResistanceSelection};
use crate::signals::entry::EntryConfig;

pub const DEFAULT_PUSHBULLET_BASE_URL: &str = "https://api.pushbullet.com";
pub const DEFAULT_BINANCE_BASE_URL: &str = "https://api.binance.com";

/// Current deployment environment (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub pushbullet_token: String,
    pub pushbullet_base_url: String,
    pub binance_base_url: String,
    pub http_timeout: Duration,
    pub symbols_file: PathBuf,
    pub model_dir: PathBuf,
    pub image_dir: PathBuf,
    pub candle_interval: String,
    pub candle_limit: usize,
    pub poll_interval: Duration,
    pub listen_interval: Duration,
    pub levels: LevelConfig,
    pub entry: EntryConfig,
    /// Instrument symbol (e.g. `ETH/USDT`) to notification channel tag.
    pub symbol_channels: HashMap<String, String>,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let pushbullet_token = get("PUSHBULLET_TOKEN")
            .ok_or_else(|| Error::Config("PUSHBULLET_TOKEN must be set".to_string()))?;

        let level_defaults = LevelConfig::default();
        let resistance_selection = match get("LEVEL_RESISTANCE_SELECTION") {
            Some(raw) => raw.parse::<ResistanceSelection>()?,
            None => level_defaults.resistance_selection,
        };
        let levels = LevelConfig {
            window: parse_or(&get, "LEVEL_WINDOW", level_defaults.window)?,
            num_levels: parse_or(&get, "LEVEL_COUNT", level_defaults.num_levels)?,
            min_distance: parse_or(&get, "LEVEL_MIN_DISTANCE", level_defaults.min_distance)?,
            resistance_selection,
        };

        let entry_defaults = EntryConfig::default();
        let entry = EntryConfig {
            stop_offset: parse_or(&get, "ENTRY_STOP_OFFSET", entry_defaults.stop_offset)?,
            target_offset: parse_or(&get, "ENTRY_TARGET_OFFSET", entry_defaults.target_offset)?,
        };

        let symbol_channels = match get("SYMBOL_CHANNELS") {
            Some(raw) => parse_symbol_channels(&raw)?,
            None => HashMap::new(),
        };

        Ok(Self {
            pushbullet_token,
            pushbullet_base_url: get("PUSHBULLET_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PUSHBULLET_BASE_URL.to_string()),
            binance_base_url: get("BINANCE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BINANCE_BASE_URL.to_string()),
            http_timeout: Duration::from_secs(parse_or(&get, "HTTP_TIMEOUT_SECONDS", 30u64)?),
            symbols_file: get("SYMBOLS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("symbols.txt")),
            model_dir: get("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("models")),
            image_dir: get("IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("images")),
            candle_interval: get("CANDLE_INTERVAL").unwrap_or_else(|| "4h".to_string()),
            candle_limit: parse_or(&get, "CANDLE_LIMIT", 100usize)?,
            poll_interval: Duration::from_secs(parse_or(&get, "POLL_INTERVAL_SECONDS", 600u64)?),
            listen_interval: Duration::from_secs(parse_or(
                &get,
                "LISTEN_INTERVAL_SECONDS",
                10u64,
            )?),
            levels,
            entry,
            symbol_channels,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| Error::Config(format!("{} has an invalid value: '{}'", key, raw))),
        None => Ok(default),
    }
}

/// Parse `ETH/USDT=eth_channel,BTC/USDT=btc_channel`.
pub fn parse_symbol_channels(raw: &str) -> Result<HashMap<String, String>> {
    let mut channels = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (symbol, tag) = pair.split_once('=').ok_or_else(|| {
            Error::Config(format!("SYMBOL_CHANNELS entry '{}' is not SYMBOL=tag", pair))
        })?;
        let (symbol, tag) = (symbol.trim(), tag.trim());
        if symbol.is_empty() || tag.is_empty() {
            return Err(Error::Config(format!(
                "SYMBOL_CHANNELS entry '{}' is not SYMBOL=tag",
                pair
            )));
        }
        channels.insert(symbol.to_uppercase(), tag.to_string());
    }
    Ok(channels)
}
