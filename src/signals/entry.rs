//! Stop-loss / take-profit for a hypothetical entry

use serde::{Deserialize, Serialize};

use crate::indicators::structure::{detect_levels, LevelConfig};
use crate::models::indicators::Candle;
use crate::models::signal::{EntryAnalysis, EntrySide};

/// Distances used when no level lies on the needed side of the entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryConfig {
    /// Fallback support is `entry - stop_offset`.
    pub stop_offset: f64,
    /// Fallback resistance is `entry + target_offset`.
    pub target_offset: f64,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            stop_offset: 100.0,
            target_offset: 150.0,
        }
    }
}

/// Analyze an entry against the levels of `candles`.
///
/// Nearest support is the highest support strictly below the entry; nearest
/// resistance the lowest resistance strictly above it. Longs stop at the
/// support and target the resistance, shorts the other way around.
pub fn analyze_entry(
    symbol: &str,
    entry_price: f64,
    side: EntrySide,
    candles: &[Candle],
    levels_config: &LevelConfig,
    config: &EntryConfig,
) -> EntryAnalysis {
    let levels = detect_levels(candles, levels_config);

    let nearest_support = levels
        .supports
        .iter()
        .copied()
        .filter(|s| *s < entry_price)
        .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))
        .unwrap_or(entry_price - config.stop_offset);

    let nearest_resistance = levels
        .resistances
        .iter()
        .copied()
        .filter(|r| *r > entry_price)
        .fold(None, |best: Option<f64>, r| Some(best.map_or(r, |b| b.min(r))))
        .unwrap_or(entry_price + config.target_offset);

    let (stop_loss, take_profit) = match side {
        EntrySide::Long => (nearest_support, nearest_resistance),
        EntrySide::Short => (nearest_resistance, nearest_support),
    };

    EntryAnalysis {
        symbol: symbol.to_string(),
        entry_price,
        side,
        stop_loss,
        take_profit,
        supports: levels.supports,
        resistances: levels.resistances,
    }
}
