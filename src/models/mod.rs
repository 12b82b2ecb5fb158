//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{Candle, FeatureRow, FeatureVector, IndicatorRow, Levels, FEATURE_NAMES};
pub use signal::{EntryAnalysis, EntrySide, Label};
