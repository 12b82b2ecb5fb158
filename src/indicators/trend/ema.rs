//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Calculate the EMA series for a specific period.
///
/// Seeded with the first close (no SMA seed), undefined for the first
/// `period - 1` bars.
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::ema_series(closes, period)
}
