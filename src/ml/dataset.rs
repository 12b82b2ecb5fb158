//! Feature matrix with class-index labels

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<usize>,
    pub n_classes: usize,
}

impl Dataset {
    /// Build a dataset, checking that every row has the same width and that
    /// every label is a valid class index.
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<usize>, n_classes: usize) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(Error::InsufficientData(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if let Some(first) = features.first() {
            let width = first.len();
            if features.iter().any(|row| row.len() != width) {
                return Err(Error::InsufficientData(
                    "feature rows have different widths".to_string(),
                ));
            }
        }
        if let Some(bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(Error::InsufficientData(format!(
                "label {} outside of {} classes",
                bad, n_classes
            )));
        }
        Ok(Self {
            features,
            labels,
            n_classes,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Row indices drawn with replacement, as many as there are samples.
    pub fn bootstrap_indices(&self, rng: &mut ChaCha8Rng) -> Vec<usize> {
        let n = self.n_samples();
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}
