//! Unit tests for signal runtime

use std::path::PathBuf;
use std::time::Duration;

use levelwatch::core::runtime::{PassSummary, RuntimeConfig};

#[test]
fn test_runtime_config_default() {
    let config = RuntimeConfig::default();
    assert_eq!(config.poll_interval, Duration::from_secs(600));
    assert_eq!(config.symbols_file, PathBuf::from("symbols.txt"));
}

#[test]
fn test_pass_summary_default() {
    let summary = PassSummary::default();
    assert_eq!(summary.succeeded, 0);
    assert_eq!(summary.failed, 0);
}

// End-to-end passes over mocked collaborators live in the integration tests.
