//! RSI (Relative Strength Index) indicator

use crate::common::math;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Calculate the RSI series with Wilder smoothing.
///
/// RSI = 100 - (100 / (1 + RS)), RS = smoothed gain / smoothed loss.
/// Gains and losses are averaged with `alpha = 1 / period`; the first
/// `period - 1` values are undefined. A zero average loss yields 100.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; closes.len()];
    }

    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        let change = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        gains.push(Some(change.max(0.0)));
        losses.push(Some((-change).max(0.0)));
    }

    let alpha = 1.0 / period as f64;
    let avg_gains = math::ewm(&gains, alpha, period);
    let avg_losses = math::ewm(&losses, alpha, period);

    avg_gains
        .iter()
        .zip(avg_losses.iter())
        .map(|(gain, loss)| match (gain, loss) {
            (Some(_), Some(loss)) if *loss == 0.0 => Some(100.0),
            (Some(gain), Some(loss)) => {
                let rs = gain / loss;
                Some(100.0 - (100.0 / (1.0 + rs)))
            }
            _ => None,
        })
        .collect()
}
