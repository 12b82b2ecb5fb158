//! Persistence of trained per-instrument models.

pub mod model_store;

pub use model_store::{model_key, FileModelStore, MemoryModelStore, ModelStore};
