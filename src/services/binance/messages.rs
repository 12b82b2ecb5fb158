//! Binance REST payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::indicators::Candle;

/// One kline as sent by `/api/v3/klines`: a positional JSON array
/// `[open_time, open, high, low, close, volume, close_time, ...]` with prices
/// encoded as strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Kline {
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl<'de> Deserialize<'de> for Kline {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let arr: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
        if arr.len() < 6 {
            return Err(D::Error::custom("kline array too short"));
        }

        let parse_price = |v: &serde_json::Value| -> std::result::Result<f64, D::Error> {
            match v {
                serde_json::Value::String(s) => s
                    .parse::<f64>()
                    .map_err(|e| D::Error::custom(format!("invalid price '{}': {}", s, e))),
                serde_json::Value::Number(n) => {
                    n.as_f64().ok_or_else(|| D::Error::custom("invalid number"))
                }
                _ => Err(D::Error::custom("expected string or number")),
            }
        };

        Ok(Kline {
            open_time: arr[0]
                .as_i64()
                .ok_or_else(|| D::Error::custom("expected integer open time"))?,
            open: parse_price(&arr[1])?,
            high: parse_price(&arr[2])?,
            low: parse_price(&arr[3])?,
            close: parse_price(&arr[4])?,
            volume: parse_price(&arr[5])?,
        })
    }
}

impl Kline {
    /// Convert to a candle stamped with the kline's open time.
    pub fn into_candle(self) -> Result<Candle> {
        let timestamp: DateTime<Utc> = DateTime::from_timestamp_millis(self.open_time)
            .ok_or_else(|| {
                Error::MarketData(format!("kline open time {} out of range", self.open_time))
            })?;
        Ok(Candle::new(
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            timestamp,
        ))
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

/// `BTC/USDT` -> `BTCUSDT`.
pub fn exchange_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}
