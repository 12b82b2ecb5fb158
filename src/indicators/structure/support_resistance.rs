//! Support and Resistance levels detection
//!
//! Swing highs/lows are local extrema over a centered window. Candidates are
//! sorted, de-duplicated and greedily thinned so that accepted levels of the
//! same kind are more than `min_distance` apart.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;
use crate::models::indicators::{Candle, Levels};

/// Which end of the filtered resistance list is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResistanceSelection {
    /// The `num_levels` lowest resistances.
    Lowest,
    /// The `num_levels` highest resistances.
    Highest,
}

impl FromStr for ResistanceSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lowest" => Ok(ResistanceSelection::Lowest),
            "highest" => Ok(ResistanceSelection::Highest),
            other => Err(Error::Config(format!(
                "unknown resistance selection '{}', expected 'lowest' or 'highest'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Bars on each side of a swing candidate.
    pub window: usize,
    /// Maximum levels kept per kind.
    pub num_levels: usize,
    /// Minimum separation in price units (not a percentage).
    pub min_distance: f64,
    pub resistance_selection: ResistanceSelection,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            window: 3,
            num_levels: 3,
            min_distance: 30.0,
            resistance_selection: ResistanceSelection::Lowest,
        }
    }
}

/// Swing highs and swing lows, in bar order.
///
/// `highs[i]` is a swing high when it equals the maximum of
/// `highs[i - window..=i + window]`; lows use the minimum. Fewer than
/// `2 * window + 1` bars produce no swings.
pub fn find_swing_points(highs: &[f64], lows: &[f64], window: usize) -> (Vec<f64>, Vec<f64>) {
    let len = highs.len().min(lows.len());
    let mut swing_highs = Vec::new();
    let mut swing_lows = Vec::new();

    if len < 2 * window + 1 {
        return (swing_highs, swing_lows);
    }

    for i in window..len - window {
        let range = i - window..=i + window;

        let max_high = highs[range.clone()]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if highs[i] == max_high {
            swing_highs.push(highs[i]);
        }

        let min_low = lows[range].iter().copied().fold(f64::INFINITY, f64::min);
        if lows[i] == min_low {
            swing_lows.push(lows[i]);
        }
    }

    (swing_highs, swing_lows)
}

/// Sort ascending, drop duplicates and keep a candidate only if it is more
/// than `min_distance` away from every level kept so far.
pub fn filter_levels(candidates: &[f64], min_distance: f64) -> Vec<f64> {
    let mut sorted: Vec<f64> = candidates.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();

    let mut kept: Vec<f64> = Vec::new();
    for level in sorted {
        if kept.iter().all(|k| (level - k).abs() > min_distance) {
            kept.push(level);
        }
    }
    kept
}

/// Detect support and resistance levels for a candle series.
pub fn detect_levels(candles: &[Candle], config: &LevelConfig) -> Levels {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let (swing_highs, swing_lows) = find_swing_points(&highs, &lows, config.window);

    let mut supports = filter_levels(&swing_lows, config.min_distance);
    supports.truncate(config.num_levels);

    let mut resistances = filter_levels(&swing_highs, config.min_distance);
    match config.resistance_selection {
        ResistanceSelection::Lowest => resistances.truncate(config.num_levels),
        ResistanceSelection::Highest => {
            let skip = resistances.len().saturating_sub(config.num_levels);
            resistances.drain(..skip);
        }
    }

    Levels {
        supports,
        resistances,
    }
}
