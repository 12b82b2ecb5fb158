//! Thin REST client for the Binance public market endpoints.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::messages::{exchange_symbol, ApiErrorResponse, Kline};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    base_url: String,
    http: Client,
}

impl BinanceRestClient {
    /// Client with its own connection pool and the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/v3/klines`
    pub async fn klines(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Kline>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let market = exchange_symbol(symbol);
        let limit_param = limit.to_string();
        debug!(symbol = %symbol, market = %market, interval = %interval, limit, "Requesting klines");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("symbol", market.as_str()),
                ("interval", interval),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) => format!("[{}] {}", err.code, err.msg),
                Err(_) => body,
            };
            return Err(Error::MarketData(format!(
                "klines request for {} failed with {}: {}",
                symbol, status, detail
            )));
        }

        Ok(response.json::<Vec<Kline>>().await?)
    }
}
