//! Inbound entry commands, e.g. `long 42000 btc/usdt`.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::signal::EntrySide;

static ENTRY_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(long|short)\s+(\d+(\.\d+)?)\s+([a-z]{3,5}/[a-z]{3,5})$").unwrap()
});

#[derive(Debug, Clone, PartialEq)]
pub struct EntryCommand {
    pub side: EntrySide,
    pub entry_price: f64,
    /// Upper-cased instrument, e.g. `BTC/USDT`.
    pub symbol: String,
}

/// Parse a message body; anything that is not exactly one entry command
/// yields `None`.
pub fn parse_entry_command(text: &str) -> Option<EntryCommand> {
    let text = text.trim().to_lowercase();
    let caps = ENTRY_COMMAND.captures(&text)?;

    let side = caps[1].parse::<EntrySide>().ok()?;
    let entry_price = caps[2].parse::<f64>().ok()?;
    Some(EntryCommand {
        side,
        entry_price,
        symbol: caps[4].to_uppercase(),
    })
}
