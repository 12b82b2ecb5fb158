//! Binance spot market data over REST.

pub mod client;
pub mod messages;
pub mod provider;

pub use client::BinanceRestClient;
pub use provider::BinanceMarketDataProvider;
