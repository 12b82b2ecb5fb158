//! Direction labels from consecutive close-to-close changes

use crate::common::math::pct_change;
use crate::models::signal::Label;

/// A move larger than 1% in either direction is labelled up/down.
pub const LABEL_THRESHOLD: f64 = 0.01;

/// Label a relative change: `Up` above `threshold`, `Down` below
/// `-threshold`, `Flat` otherwise (the boundary itself is flat).
pub fn classify_change(pct: f64, threshold: f64) -> Label {
    if pct > threshold {
        Label::Up
    } else if pct < -threshold {
        Label::Down
    } else {
        Label::Flat
    }
}

/// One label per close. The first close has no predecessor and is `Flat`.
pub fn generate_labels(closes: &[f64]) -> Vec<Label> {
    let mut labels = vec![Label::Flat; closes.len()];
    for i in 1..closes.len() {
        labels[i] = classify_change(pct_change(closes[i - 1], closes[i]), LABEL_THRESHOLD);
    }
    labels
}
