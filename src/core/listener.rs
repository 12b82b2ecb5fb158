//! Command listener: answers entry commands posted to the notification inbox.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::core::commands::parse_entry_command;
use crate::error::Result;
use crate::indicators::structure::LevelConfig;
use crate::models::indicators::Candle;
use crate::models::signal::EntryAnalysis;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::NotificationSink;
use crate::signals::entry::{analyze_entry, EntryConfig};
use crate::signals::report::{
    format_entry_message, format_missing_data_message, ENTRY_REPLY_TITLE, ERROR_REPLY_TITLE,
};

/// Identifier of the last inbox message that was looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboxCursor {
    pub last_id: Option<String>,
}

impl InboxCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id`; returns false when it was already the last one seen.
    fn advance(&mut self, id: &str) -> bool {
        if self.last_id.as_deref() == Some(id) {
            return false;
        }
        self.last_id = Some(id.to_string());
        true
    }
}

/// What a single poll did.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Inbox empty or newest message already handled.
    Idle,
    /// New message that is not an entry command.
    Ignored,
    Analyzed(EntryAnalysis),
    /// Command for an instrument without preloaded candles.
    MissingData(String),
}

pub struct CommandListener {
    notifier: Arc<dyn NotificationSink>,
    /// Lower-cased symbol to candles, fetched once at startup.
    history: HashMap<String, Vec<Candle>>,
    levels: LevelConfig,
    entry: EntryConfig,
}

impl CommandListener {
    pub fn new(
        notifier: Arc<dyn NotificationSink>,
        history: HashMap<String, Vec<Candle>>,
        levels: LevelConfig,
        entry: EntryConfig,
    ) -> Self {
        Self {
            notifier,
            history: history
                .into_iter()
                .map(|(symbol, candles)| (symbol.to_lowercase(), candles))
                .collect(),
            levels,
            entry,
        }
    }

    /// Fetch candles for every symbol once. Symbols that fail to load are
    /// logged and left out, so commands for them get a missing-data reply.
    pub async fn preload(
        provider: &dyn MarketDataProvider,
        symbols: &[String],
        interval: &str,
        limit: usize,
    ) -> HashMap<String, Vec<Candle>> {
        let mut history = HashMap::new();
        for symbol in symbols {
            match provider.get_candles(symbol, interval, limit).await {
                Ok(candles) => {
                    debug!(symbol = %symbol, count = candles.len(), "Preloaded candles for {}", symbol);
                    history.insert(symbol.to_lowercase(), candles);
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Failed to preload candles for {}", symbol);
                }
            }
        }
        info!(loaded = history.len(), requested = symbols.len(), "Candle history preloaded");
        history
    }

    pub fn has_history(&self, symbol: &str) -> bool {
        self.history.contains_key(&symbol.to_lowercase())
    }

    /// Look at the newest inbox message and answer it if it is a new entry
    /// command.
    pub async fn poll_once(&self, cursor: &mut InboxCursor) -> Result<PollOutcome> {
        let message = match self.notifier.latest_message().await? {
            Some(message) => message,
            None => return Ok(PollOutcome::Idle),
        };
        if !cursor.advance(&message.id) {
            return Ok(PollOutcome::Idle);
        }

        let command = match message.body.as_deref().and_then(parse_entry_command) {
            Some(command) => command,
            None => {
                debug!(id = %message.id, "Ignoring non-command message");
                return Ok(PollOutcome::Ignored);
            }
        };
        info!(
            side = %command.side,
            price = command.entry_price,
            symbol = %command.symbol,
            "Received entry command"
        );

        let candles = match self.history.get(&command.symbol.to_lowercase()) {
            Some(candles) => candles,
            None => {
                self.notifier
                    .notify(
                        ERROR_REPLY_TITLE,
                        &format_missing_data_message(&command.symbol),
                        None,
                        None,
                    )
                    .await?;
                return Ok(PollOutcome::MissingData(command.symbol));
            }
        };

        let analysis = analyze_entry(
            &command.symbol,
            command.entry_price,
            command.side,
            candles,
            &self.levels,
            &self.entry,
        );
        let message = format_entry_message(&analysis, Local::now().naive_local());
        self.notifier
            .notify(ENTRY_REPLY_TITLE, &message, None, None)
            .await?;
        Ok(PollOutcome::Analyzed(analysis))
    }

    /// Poll forever, `interval` apart. Poll errors are logged and the loop
    /// keeps going.
    pub async fn run(&self, interval: Duration) {
        let mut cursor = InboxCursor::new();
        info!(interval = interval.as_secs(), "CommandListener: started");

        loop {
            if let Err(e) = self.poll_once(&mut cursor).await {
                error!(error = %e, "CommandListener: poll failed");
            }
            tokio::time::sleep(interval).await;
        }
    }
}
