//! Market data provider interface.

use crate::error::Result;
use crate::models::indicators::Candle;

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest `limit` candles for `symbol` (e.g. `BTC/USDT`) at `interval`
    /// (e.g. `4h`), oldest first.
    async fn get_candles(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Candle>>;
}
