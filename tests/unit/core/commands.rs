//! Unit tests for entry command parsing

use levelwatch::core::commands::{parse_entry_command, EntryCommand};
use levelwatch::models::signal::EntrySide;

#[test]
fn test_parse_long_command() {
    assert_eq!(
        parse_entry_command("long 42000 btc/usdt"),
        Some(EntryCommand {
            side: EntrySide::Long,
            entry_price: 42000.0,
            symbol: "BTC/USDT".to_string(),
        })
    );
}

#[test]
fn test_parse_is_case_insensitive_and_trimmed() {
    let command = parse_entry_command("  SHORT   1850.25   ETH/USDT \n").unwrap();
    assert_eq!(command.side, EntrySide::Short);
    assert_eq!(command.entry_price, 1850.25);
    assert_eq!(command.symbol, "ETH/USDT");
}

#[test]
fn test_rejects_other_messages() {
    for text in [
        "",
        "hello",
        "long btc/usdt 42000",
        "buy 42000 btc/usdt",
        "long -5 btc/usdt",
        "long 42000 btcusdt",
        "long 42000 bitcoin/usdt",
        "long 42000 btc/usdt please",
        "long 4.2e4 btc/usdt",
        "long 42000. btc/usdt",
    ] {
        assert_eq!(parse_entry_command(text), None, "should reject {:?}", text);
    }
}
