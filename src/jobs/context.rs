//! Job context for dependency injection

use std::sync::Arc;

use crate::indicators::structure::LevelConfig;
use crate::services::chart::ChartRenderer;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::NotificationSink;
use crate::signals::classifier::DirectionClassifier;

/// Collaborators and settings shared by every signal job.
pub struct JobContext {
    pub data_provider: Arc<dyn MarketDataProvider>,
    pub classifier: DirectionClassifier,
    pub renderer: Arc<dyn ChartRenderer>,
    pub notifier: Arc<dyn NotificationSink>,
    pub levels: LevelConfig,
    /// Candle interval requested from the provider, e.g. `4h`.
    pub interval: String,
    /// Number of candles requested per instrument.
    pub limit: usize,
}

impl JobContext {
    pub fn new(
        data_provider: Arc<dyn MarketDataProvider>,
        classifier: DirectionClassifier,
        renderer: Arc<dyn ChartRenderer>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            data_provider,
            classifier,
            renderer,
            notifier,
            levels: LevelConfig::default(),
            interval: "4h".to_string(),
            limit: 100,
        }
    }

    pub fn with_levels(mut self, levels: LevelConfig) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_candles(mut self, interval: impl Into<String>, limit: usize) -> Self {
        self.interval = interval.into();
        self.limit = limit;
        self
    }
}
