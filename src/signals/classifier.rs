//! Per-instrument direction classifier backed by a model store.
//!
//! The first prediction for an instrument trains a forest on the full feature
//! history and stores it. Every later prediction reuses the stored forest as
//! is; it is never re-validated or retrained.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::ml::{Dataset, ForestConfig, RandomForest};
use crate::models::indicators::FeatureVector;
use crate::models::signal::Label;
use crate::storage::{model_key, ModelStore};

/// Fewer complete rows than this cannot train a model.
pub const MIN_TRAINING_ROWS: usize = 2;

pub struct DirectionClassifier {
    store: Arc<dyn ModelStore>,
    forest_config: ForestConfig,
}

impl DirectionClassifier {
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self::with_config(store, ForestConfig::default())
    }

    pub fn with_config(store: Arc<dyn ModelStore>, forest_config: ForestConfig) -> Self {
        Self {
            store,
            forest_config,
        }
    }

    /// Predict the label of the most recent feature row.
    ///
    /// `labels` must be aligned with `features`; they are only used when no
    /// model is stored for `symbol` yet.
    pub fn predict_latest(
        &self,
        symbol: &str,
        features: &[FeatureVector],
        labels: &[Label],
    ) -> Result<Label> {
        let latest = features.last().ok_or_else(|| {
            Error::InsufficientData(format!("no complete feature rows for {}", symbol))
        })?;

        let forest = self.load_or_train(symbol, features, labels)?;
        let class = forest.predict_one(&latest.to_array())?;
        Label::from_index(class)
            .ok_or_else(|| Error::Store(format!("model for {} predicted unknown class {}", symbol, class)))
    }

    /// Load the stored forest for `symbol`, or train and store a new one.
    pub fn load_or_train(
        &self,
        symbol: &str,
        features: &[FeatureVector],
        labels: &[Label],
    ) -> Result<RandomForest> {
        let key = model_key(symbol);

        if self.store.exists(&key) {
            let bytes = self.store.load(&key)?;
            let forest: RandomForest = serde_json::from_slice(&bytes)?;
            debug!(symbol = %symbol, key = %key, "Loaded stored model for {}", symbol);
            return Ok(forest);
        }

        let forest = self.train(symbol, features, labels)?;
        let bytes = serde_json::to_vec(&forest)?;
        self.store.save(&key, &bytes)?;
        info!(
            symbol = %symbol,
            key = %key,
            rows = features.len(),
            trees = forest.n_trees(),
            "Trained and stored new model for {}",
            symbol
        );
        Ok(forest)
    }

    fn train(&self, symbol: &str, features: &[FeatureVector], labels: &[Label]) -> Result<RandomForest> {
        if features.len() < MIN_TRAINING_ROWS {
            return Err(Error::InsufficientData(format!(
                "{} has {} complete feature rows, need at least {}",
                symbol,
                features.len(),
                MIN_TRAINING_ROWS
            )));
        }

        let dataset = Dataset::new(
            features.iter().map(|f| f.to_array().to_vec()).collect(),
            labels.iter().map(|l| l.index()).collect(),
            Label::ALL.len(),
        )?;

        let mut forest = RandomForest::new(self.forest_config.clone());
        forest.fit(&dataset)?;
        Ok(forest)
    }
}
