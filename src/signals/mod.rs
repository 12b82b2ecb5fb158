//! Signal derivation: labels, direction classification, entry analysis and
//! user-facing reports.

pub mod classifier;
pub mod entry;
pub mod labels;
pub mod report;

pub use classifier::DirectionClassifier;
pub use entry::{analyze_entry, EntryConfig};
pub use labels::{generate_labels, LABEL_THRESHOLD};
