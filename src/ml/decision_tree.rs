//! CART classification tree (Gini impurity)

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;

/// Decision tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth (None = grow until leaves are pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in each child
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for feature sampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        /// Class distribution of the training samples that reached the leaf
        probabilities: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

/// Decision tree model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    config: TreeConfig,
    n_classes: usize,
    root: Option<TreeNode>,
}

impl DecisionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self {
            config,
            n_classes: 0,
            root: None,
        }
    }

    /// Train on the given rows of the dataset (rows may repeat).
    pub fn fit(&mut self, dataset: &Dataset, indices: &[usize]) {
        self.n_classes = dataset.n_classes;
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.root = Some(self.build(dataset, indices, 0, &mut rng));
    }

    fn build(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let counts = class_counts(dataset, indices, self.n_classes);
        let impurity = gini(&counts, indices.len());

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || indices.len() < self.config.min_samples_split || impurity <= 1e-12 {
            return leaf(&counts, indices.len());
        }

        match self.find_best_split(dataset, indices, impurity, rng) {
            Some(split) if !split.left.is_empty() && !split.right.is_empty() => {
                let left = self.build(dataset, &split.left, depth + 1, rng);
                let right = self.build(dataset, &split.right, depth + 1, rng);
                TreeNode::Split {
                    feature: split.feature,
                    threshold: split.threshold,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
            _ => leaf(&counts, indices.len()),
        }
    }

    fn find_best_split(
        &self,
        dataset: &Dataset,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<SplitCandidate> {
        let n_features = dataset.n_features();
        let max_features = self
            .config
            .max_features
            .unwrap_or(n_features)
            .clamp(1, n_features.max(1));

        let mut features: Vec<usize> = (0..n_features).collect();
        features.shuffle(rng);
        features.truncate(max_features);

        let n = indices.len();
        let min_leaf = self.config.min_samples_leaf.max(1);
        let mut best_gain = 1e-12;
        let mut best: Option<(usize, f64)> = None;

        for &feature in &features {
            let mut sorted = indices.to_vec();
            sorted.sort_by(|&a, &b| {
                dataset.features[a][feature].total_cmp(&dataset.features[b][feature])
            });

            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = class_counts(dataset, indices, self.n_classes);

            for pos in 0..n - 1 {
                let label = dataset.labels[sorted[pos]];
                left_counts[label] += 1;
                right_counts[label] -= 1;

                let current = dataset.features[sorted[pos]][feature];
                let next = dataset.features[sorted[pos + 1]][feature];
                if current == next {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < min_leaf || n_right < min_leaf {
                    continue;
                }

                let weighted = (n_left as f64 * gini(&left_counts, n_left)
                    + n_right as f64 * gini(&right_counts, n_right))
                    / n as f64;
                let gain = parent_impurity - weighted;
                if gain > best_gain {
                    best_gain = gain;
                    // Adjacent floats can round the midpoint up to `next`.
                    let mid = (current + next) / 2.0;
                    let threshold = if mid < next { mid } else { current };
                    best = Some((feature, threshold));
                }
            }
        }

        let (feature, threshold) = best?;
        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| dataset.features[i][feature] <= threshold);

        Some(SplitCandidate {
            feature,
            threshold,
            left,
            right,
        })
    }

    /// Class probabilities for one sample.
    pub fn predict_proba_one(&self, features: &[f64]) -> Vec<f64> {
        let mut node = match &self.root {
            Some(root) => root,
            None => return vec![0.0; self.n_classes],
        };

        loop {
            match node {
                TreeNode::Leaf { probabilities } => return probabilities.clone(),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(f64::NAN);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn class_counts(dataset: &Dataset, indices: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &i in indices {
        counts[dataset.labels[i]] += 1;
    }
    counts
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

fn leaf(counts: &[usize], total: usize) -> TreeNode {
    let probabilities = if total == 0 {
        vec![0.0; counts.len()]
    } else {
        counts.iter().map(|&c| c as f64 / total as f64).collect()
    };
    TreeNode::Leaf { probabilities }
}
