//! Exponentially weighted series used by the indicator engine.

/// Recursive exponentially weighted mean over a series with gaps.
///
/// `out[t] = (1 - alpha) * out[t-1] + alpha * x[t]`, seeded with the first
/// present value. Missing inputs carry the previous state forward. A value is
/// only reported once `min_periods` observations have been seen.
pub fn ewm(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut state: Option<f64> = None;
    let mut observed = 0usize;

    values
        .iter()
        .map(|value| {
            if let Some(x) = *value {
                state = Some(match state {
                    Some(prev) => (1.0 - alpha) * prev + alpha * x,
                    None => x,
                });
                observed += 1;
            }
            if observed >= min_periods {
                state
            } else {
                None
            }
        })
        .collect()
}

/// EMA series with `alpha = 2 / (period + 1)`, undefined for the first
/// `period - 1` values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let present: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ema_series_sparse(&present, period)
}

/// EMA over a series whose prefix may be undefined (e.g. the MACD line).
pub fn ema_series_sparse(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    ewm(values, 2.0 / (period as f64 + 1.0), period)
}

/// Relative change from `previous` to `current`.
pub fn pct_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous
}
