use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order of the classifier inputs. Persisted models depend on it.
pub const FEATURE_NAMES: [&str; 5] = ["rsi", "macd", "macd_signal", "ema12", "ema26"];

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub ema12: f64,
    pub ema26: f64,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; 5] {
        [self.rsi, self.macd, self.macd_signal, self.ema12, self.ema26]
    }
}

/// A candle with every indicator the engine computes; `None` during warm-up.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub candle: Candle,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub ema12: Option<f64>,
    pub ema26: Option<f64>,
}

impl IndicatorRow {
    /// The complete feature vector, if every indicator is defined.
    pub fn features(&self) -> Option<FeatureVector> {
        Some(FeatureVector {
            rsi: self.rsi?,
            macd: self.macd?,
            macd_signal: self.macd_signal?,
            ema12: self.ema12?,
            ema26: self.ema26?,
        })
    }
}

/// A candle whose indicators are all defined.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub candle: Candle,
    pub features: FeatureVector,
}

/// Support and resistance levels, each list ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub supports: Vec<f64>,
    pub resistances: Vec<f64>,
}
