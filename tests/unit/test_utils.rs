//! Shared fixtures for unit tests

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use levelwatch::models::indicators::Candle;

pub const FOUR_HOURS: i64 = 4 * 60 * 60;

pub fn timestamp(i: usize) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + i as i64 * FOUR_HOURS, 0).unwrap()
}

/// Oscillating series with a slow upward drift, so every label occurs.
pub fn wave_closes(count: usize, base: f64) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let i = i as f64;
            base + base * 0.03 * (i * 0.7).sin() + base * 0.02 * (i * 0.23).cos() + i * 2.0
        })
        .collect()
}

pub fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle::new(
                open,
                open.max(close) + 20.0,
                open.min(close) - 20.0,
                close,
                1000.0 + i as f64,
                timestamp(i),
            )
        })
        .collect()
}

pub fn candles_from_highs_lows(highs: &[f64], lows: &[f64]) -> Vec<Candle> {
    highs
        .iter()
        .zip(lows)
        .enumerate()
        .map(|(i, (&high, &low))| {
            let mid = (high + low) / 2.0;
            Candle::new(mid, high, low, mid, 1.0, timestamp(i))
        })
        .collect()
}

pub fn wave_candles(count: usize, base: f64) -> Vec<Candle> {
    candles_from_closes(&wave_closes(count, base))
}
