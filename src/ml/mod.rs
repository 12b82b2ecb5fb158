//! Tree ensemble classifier used for direction prediction.

pub mod dataset;
pub mod decision_tree;
pub mod random_forest;

pub use dataset::Dataset;
pub use decision_tree::{DecisionTree, TreeConfig};
pub use random_forest::{ForestConfig, RandomForest};
