//! Binance market data provider implementation

use super::client::BinanceRestClient;
use crate::error::Result;
use crate::models::indicators::Candle;
use crate::services::market_data::MarketDataProvider;

pub struct BinanceMarketDataProvider {
    client: BinanceRestClient,
}

impl BinanceMarketDataProvider {
    pub fn new(client: BinanceRestClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &BinanceRestClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    async fn get_candles(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Candle>> {
        let klines = self.client.klines(symbol, interval, limit).await?;
        let mut candles = klines
            .into_iter()
            .map(|k| k.into_candle())
            .collect::<Result<Vec<_>>>()?;
        candles.sort_by_key(|c| c.timestamp);
        Ok(candles)
    }
}
