//! Adapters for the external collaborators: exchange, notification service,
//! chart output and the instrument list.

pub mod binance;
pub mod chart;
pub mod market_data;
pub mod notifier;
pub mod pushbullet;
pub mod symbols;

pub use binance::BinanceMarketDataProvider;
pub use chart::{ChartRenderer, PngChartRenderer};
pub use market_data::MarketDataProvider;
pub use notifier::{InboxMessage, NotificationSink};
pub use pushbullet::PushbulletNotifier;
pub use symbols::load_symbols;
