//! Technical indicators computed from candle series.

pub mod engine;
pub mod momentum;
pub mod structure;
pub mod trend;

pub use engine::{complete_rows, compute_indicators};
