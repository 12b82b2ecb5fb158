//! Market structure: swing-based support and resistance levels

pub mod support_resistance;

pub use support_resistance::*;
