//! Levelwatch: polls an exchange for candles, classifies the next move with a
//! per-instrument random forest, detects support/resistance levels and pushes
//! the result to a notification channel.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod jobs;
pub mod logging;
pub mod ml;
pub mod models;
pub mod services;
pub mod signals;
pub mod storage;

pub use error::{Error, Result};
