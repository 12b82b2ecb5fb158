//! Indicator engine: annotates a candle series with the classifier features.

use crate::indicators::momentum::{calculate_macd_default, calculate_rsi, DEFAULT_RSI_PERIOD};
use crate::indicators::trend::calculate_ema;
use crate::models::indicators::{Candle, FeatureRow, IndicatorRow};

/// Compute RSI(14), MACD(12, 26, 9) with its signal line, EMA12 and EMA26 for
/// every candle. Values are `None` during each indicator's warm-up.
pub fn compute_indicators(candles: &[Candle]) -> Vec<IndicatorRow> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let rsi = calculate_rsi(&closes, DEFAULT_RSI_PERIOD);
    let macd = calculate_macd_default(&closes);
    let ema12 = calculate_ema(&closes, 12);
    let ema26 = calculate_ema(&closes, 26);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| IndicatorRow {
            candle: candle.clone(),
            rsi: rsi[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
            ema12: ema12[i],
            ema26: ema26[i],
        })
        .collect()
}

/// Keep only rows where every indicator is defined.
pub fn complete_rows(rows: &[IndicatorRow]) -> Vec<FeatureRow> {
    rows.iter()
        .filter_map(|row| {
            row.features().map(|features| FeatureRow {
                candle: row.candle.clone(),
                features,
            })
        })
        .collect()
}
