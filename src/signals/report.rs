//! User-facing message layouts.

use chrono::NaiveDateTime;

use crate::models::indicators::{FeatureRow, Levels};
use crate::models::signal::{EntryAnalysis, Label};

pub const ENTRY_REPLY_TITLE: &str = "Phân tích lệnh";
pub const ERROR_REPLY_TITLE: &str = "Lỗi";

pub fn signal_title(symbol: &str) -> String {
    format!("Tín hiệu {}", symbol)
}

/// Comma separated prices with two decimals.
pub fn format_levels(levels: &[f64]) -> String {
    levels
        .iter()
        .map(|l| format!("{:.2}", l))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Signal push for the latest complete row of an instrument.
pub fn format_signal_message(symbol: &str, latest: &FeatureRow, levels: &Levels, prediction: Label) -> String {
    let f = &latest.features;
    let mut message = format!("=== TÍN HIỆU {} ===\n", symbol);
    message += &format!("🕓 {}\n", latest.candle.timestamp.format("%Y-%m-%d %H:%M:%S"));
    message += &format!("🔹 RSI: {:.2}\n", f.rsi);
    message += &format!("🔹 MACD: {:.2}, Signal: {:.2}\n", f.macd, f.macd_signal);
    message += &format!("🔹 EMA12: {:.2}, EMA26: {:.2}\n", f.ema12, f.ema26);
    message += &format!("📉 Hỗ trợ: {}\n", format_levels(&levels.supports));
    message += &format!("📈 Kháng cự: {}\n", format_levels(&levels.resistances));
    message += &format!("💡 Dự đoán: {}", prediction.display());
    message
}

/// Reply to an entry command. `now` is the local wall-clock time.
pub fn format_entry_message(analysis: &EntryAnalysis, now: NaiveDateTime) -> String {
    let side = analysis.side.to_string().to_uppercase();
    let mut message = format!(
        "=== PHÂN TÍCH LỆNH '{} {:?}' ({}) ===\n",
        side, analysis.entry_price, analysis.symbol
    );
    message += &format!("🕒 {}\n", now.format("%Y-%m-%d %H:%M"));
    message += &format!("💵 Giá vào lệnh: {:?}\n", analysis.entry_price);
    message += &format!("🔻 Cắt lỗ: {:.2}\n", analysis.stop_loss);
    message += &format!("🔺 Chốt lời: {:.2}\n", analysis.take_profit);
    message += &format!("📉 Hỗ trợ: {}\n", format_levels(&analysis.supports));
    message += &format!("📈 Kháng cự: {}", format_levels(&analysis.resistances));
    message
}

pub fn format_missing_data_message(symbol: &str) -> String {
    format!("Không tìm thấy dữ liệu cho {}", symbol)
}
