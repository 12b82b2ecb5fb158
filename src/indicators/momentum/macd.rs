//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;

pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// MACD line and signal line, one entry per close.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Calculate MACD
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal_period) of MACD, starting at the first defined MACD value
pub fn calculate_macd(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast = math::ema_series(closes, fast_period);
    let slow = math::ema_series(closes, slow_period);

    let macd: Vec<Option<f64>> = fast
        .iter()
        .zip(slow.iter())
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal = math::ema_series_sparse(&macd, signal_period);

    MacdSeries { macd, signal }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> MacdSeries {
    calculate_macd(closes, DEFAULT_MACD_FAST, DEFAULT_MACD_SLOW, DEFAULT_MACD_SIGNAL)
}
