//! Unit tests for the indicator table

use levelwatch::indicators::{complete_rows, compute_indicators};

use crate::test_utils::wave_candles;

#[test]
fn test_indicator_rows_align_with_candles() {
    let candles = wave_candles(100, 30_000.0);
    let rows = compute_indicators(&candles);

    assert_eq!(rows.len(), candles.len());
    for (row, candle) in rows.iter().zip(&candles) {
        assert_eq!(&row.candle, candle);
    }
    assert!(rows[13].rsi.is_some());
    assert!(rows[11].ema12.is_some());
    assert!(rows[25].ema26.is_some());
}

#[test]
fn test_complete_rows_start_after_warm_up() {
    let candles = wave_candles(100, 30_000.0);
    let complete = complete_rows(&compute_indicators(&candles));

    assert_eq!(complete.len(), 67);
    assert_eq!(complete[0].candle, candles[33]);
    assert_eq!(complete.last().unwrap().candle, candles[99]);
}

#[test]
fn test_short_history_has_no_complete_rows() {
    let candles = wave_candles(33, 30_000.0);
    assert!(complete_rows(&compute_indicators(&candles)).is_empty());

    let candles = wave_candles(34, 30_000.0);
    assert_eq!(complete_rows(&compute_indicators(&candles)).len(), 1);
}
