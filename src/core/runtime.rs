//! Sequential polling loop over the configured instruments

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::Result;
use crate::jobs::context::JobContext;
use crate::jobs::handlers::process_symbol;
use crate::services::symbols::load_symbols;

/// Configuration for the polling loop
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pause after each full pass.
    pub poll_interval: Duration,
    /// Instrument list, re-read before every pass.
    pub symbols_file: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(600),
            symbols_file: PathBuf::from("symbols.txt"),
        }
    }
}

/// Outcome counts of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub struct SignalRuntime {
    config: RuntimeConfig,
    job_context: Arc<JobContext>,
}

impl SignalRuntime {
    pub fn new(config: RuntimeConfig, job_context: Arc<JobContext>) -> Self {
        Self {
            config,
            job_context,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Process every instrument once, in file order.
    ///
    /// A failing instrument is logged and skipped; only an unreadable
    /// instrument list fails the pass.
    pub async fn run_pass(&self) -> Result<PassSummary> {
        let symbols = load_symbols(&self.config.symbols_file)?;
        if symbols.is_empty() {
            warn!(
                file = %self.config.symbols_file.display(),
                "SignalRuntime: no symbols configured"
            );
        }

        let mut summary = PassSummary::default();
        for symbol in &symbols {
            match process_symbol(&self.job_context, symbol).await {
                Ok(()) => summary.succeeded += 1,
                Err(e) => {
                    summary.failed += 1;
                    error!(
                        symbol = %symbol,
                        error = %e,
                        "SignalRuntime: failed to process {}",
                        symbol
                    );
                }
            }
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "SignalRuntime: pass complete ({} ok, {} failed)",
            summary.succeeded,
            summary.failed
        );
        Ok(summary)
    }

    /// Run passes forever, sleeping `poll_interval` after each one.
    pub async fn run(&self) {
        info!(
            interval = self.config.poll_interval.as_secs(),
            file = %self.config.symbols_file.display(),
            "SignalRuntime: started, polling every {}s",
            self.config.poll_interval.as_secs()
        );

        loop {
            if let Err(e) = self.run_pass().await {
                error!(error = %e, "SignalRuntime: pass aborted");
            }
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
