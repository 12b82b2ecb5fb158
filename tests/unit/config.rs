//! Unit tests for environment configuration

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use levelwatch::config::{parse_symbol_channels, Config};
use levelwatch::indicators::structure::ResistanceSelection;
use levelwatch::Error;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults_with_only_token() {
    let config = Config::from_lookup(lookup(&[("PUSHBULLET_TOKEN", "secret")])).unwrap();

    assert_eq!(config.pushbullet_token, "secret");
    assert_eq!(config.pushbullet_base_url, "https://api.pushbullet.com");
    assert_eq!(config.binance_base_url, "https://api.binance.com");
    assert_eq!(config.http_timeout, Duration::from_secs(30));
    assert_eq!(config.symbols_file, PathBuf::from("symbols.txt"));
    assert_eq!(config.model_dir, PathBuf::from("models"));
    assert_eq!(config.image_dir, PathBuf::from("images"));
    assert_eq!(config.candle_interval, "4h");
    assert_eq!(config.candle_limit, 100);
    assert_eq!(config.poll_interval, Duration::from_secs(600));
    assert_eq!(config.listen_interval, Duration::from_secs(10));
    assert_eq!(config.levels.window, 3);
    assert_eq!(config.levels.num_levels, 3);
    assert_eq!(config.levels.min_distance, 30.0);
    assert_eq!(config.levels.resistance_selection, ResistanceSelection::Lowest);
    assert_eq!(config.entry.stop_offset, 100.0);
    assert_eq!(config.entry.target_offset, 150.0);
    assert!(config.symbol_channels.is_empty());
}

#[test]
fn test_missing_token_is_an_error() {
    let result = Config::from_lookup(lookup(&[]));
    assert!(matches!(result, Err(Error::Config(_))));

    let blank = Config::from_lookup(lookup(&[("PUSHBULLET_TOKEN", "  ")]));
    assert!(matches!(blank, Err(Error::Config(_))));
}

#[test]
fn test_overrides() {
    let config = Config::from_lookup(lookup(&[
        ("PUSHBULLET_TOKEN", "t"),
        ("CANDLE_INTERVAL", "1h"),
        ("CANDLE_LIMIT", "250"),
        ("POLL_INTERVAL_SECONDS", "60"),
        ("LEVEL_MIN_DISTANCE", "12.5"),
        ("LEVEL_RESISTANCE_SELECTION", "Highest"),
        ("ENTRY_STOP_OFFSET", "80"),
        ("SYMBOL_CHANNELS", "eth/usdt=eth_channel"),
    ]))
    .unwrap();

    assert_eq!(config.candle_interval, "1h");
    assert_eq!(config.candle_limit, 250);
    assert_eq!(config.poll_interval, Duration::from_secs(60));
    assert_eq!(config.levels.min_distance, 12.5);
    assert_eq!(config.levels.resistance_selection, ResistanceSelection::Highest);
    assert_eq!(config.entry.stop_offset, 80.0);
    assert_eq!(config.entry.target_offset, 150.0);
    assert_eq!(
        config.symbol_channels.get("ETH/USDT").map(String::as_str),
        Some("eth_channel")
    );
}

#[test]
fn test_invalid_number_is_rejected() {
    let result = Config::from_lookup(lookup(&[
        ("PUSHBULLET_TOKEN", "t"),
        ("CANDLE_LIMIT", "lots"),
    ]));
    assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("CANDLE_LIMIT")));
}

#[test]
fn test_invalid_resistance_selection_is_rejected() {
    let result = Config::from_lookup(lookup(&[
        ("PUSHBULLET_TOKEN", "t"),
        ("LEVEL_RESISTANCE_SELECTION", "middle"),
    ]));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_parse_symbol_channels() {
    let channels = parse_symbol_channels(" ETH/USDT = eth_channel , btc/usdt=btc ,").unwrap();
    assert_eq!(channels.len(), 2);
    assert_eq!(channels["ETH/USDT"], "eth_channel");
    assert_eq!(channels["BTC/USDT"], "btc");

    assert!(parse_symbol_channels("ETH/USDT").is_err());
    assert!(parse_symbol_channels("=tag").is_err());
}
