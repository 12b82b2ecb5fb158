//! Notification sink interface.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Most recent message of the inbound inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboxMessage {
    /// Unique identifier, used to skip messages that were already handled.
    pub id: String,
    pub body: Option<String>,
}

#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    /// Push `message` with an optional image attachment.
    ///
    /// When `symbol` maps to a configured channel the push goes there,
    /// otherwise to the default inbox.
    async fn notify(
        &self,
        title: &str,
        message: &str,
        image: Option<&Path>,
        symbol: Option<&str>,
    ) -> Result<()>;

    /// The newest message in the inbox, if any.
    async fn latest_message(&self) -> Result<Option<InboxMessage>>;
}
