//! Random Forest classifier

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::decision_tree::{DecisionTree, TreeConfig};
use crate::error::{Error, Result};

/// Random Forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree (None = unlimited)
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (sqrt of total if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random Forest model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            n_features: 0,
            n_classes: 0,
            trees: Vec::new(),
        }
    }

    /// Train the forest. Fails on an empty dataset.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.n_samples() == 0 || dataset.n_features() == 0 {
            return Err(Error::InsufficientData(
                "cannot train a forest on an empty feature matrix".to_string(),
            ));
        }

        self.n_features = dataset.n_features();
        self.n_classes = dataset.n_classes;

        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (self.n_features as f64).sqrt().floor().max(1.0) as usize);
        let all_rows: Vec<usize> = (0..dataset.n_samples()).collect();

        self.trees = (0..self.config.n_trees)
            .map(|i| {
                let seed = self.config.seed.wrapping_add(i as u64);
                let mut tree = DecisionTree::new(TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed,
                });

                if self.config.bootstrap {
                    let mut rng = ChaCha8Rng::seed_from_u64(seed);
                    let sample = dataset.bootstrap_indices(&mut rng);
                    tree.fit(dataset, &sample);
                } else {
                    tree.fit(dataset, &all_rows);
                }
                tree
            })
            .collect();

        Ok(())
    }

    /// Class probabilities averaged over all trees.
    pub fn predict_proba_one(&self, features: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_classes];
        if self.trees.is_empty() {
            return totals;
        }

        for tree in &self.trees {
            for (total, p) in totals.iter_mut().zip(tree.predict_proba_one(features)) {
                *total += p;
            }
        }
        let n = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= n);
        totals
    }

    /// Most probable class index; ties resolve to the lowest index.
    pub fn predict_one(&self, features: &[f64]) -> Result<usize> {
        if self.trees.is_empty() {
            return Err(Error::InsufficientData("forest has not been trained".to_string()));
        }
        if features.len() != self.n_features {
            return Err(Error::InsufficientData(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let probabilities = self.predict_proba_one(features);
        let mut best = 0;
        for (class, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = class;
            }
        }
        Ok(best)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}
