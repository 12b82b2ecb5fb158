//! Per-instrument signal job

pub mod context;
pub mod handlers;

pub use context::JobContext;
pub use handlers::process_symbol;
