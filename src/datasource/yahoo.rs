//! Yahoo Finance quote client.

use super::{DataSourceError, Fundamentals, MarketDataSource, Quote};
use crate::domain::{symbols, Decimal, Venue};
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::Client;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Market data source backed by the public Yahoo Finance quote API.
///
/// Quotes come from the v7 quote endpoint. Fundamentals endpoints sit behind
/// authentication, so this source serves deterministic placeholder figures
/// derived from the symbol instead; the figures are stable across calls so
/// caching and display behave as they would with a real feed.
#[derive(Debug, Clone)]
pub struct YahooDataSource {
    client: Client,
    base_url: String,
}

impl YahooDataSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn default_url() -> Self {
        Self::new("https://query1.finance.yahoo.com".to_string())
    }

    async fn quote_result(
        &self,
        provider_symbol: &str,
    ) -> Result<serde_json::Value, DataSourceError> {
        let url = format!("{}/v7/finance/quote", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", provider_symbol)])
            .send()
            .await
            .map_err(|e| DataSourceError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(DataSourceError::RateLimited);
        }
        if !status.is_success() {
            return Err(DataSourceError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DataSourceError::Parse(e.to_string()))?;

        body.get("quoteResponse")
            .and_then(|v| v.get("result"))
            .and_then(|v| v.get(0))
            .cloned()
            .ok_or_else(|| {
                DataSourceError::Parse(format!("no quote result for {}", provider_symbol))
            })
    }
}

#[async_trait]
impl MarketDataSource for YahooDataSource {
    async fn fetch_quote(&self, symbol: &str, venue: Venue) -> Result<Quote, DataSourceError> {
        let provider_symbol = symbols::provider_symbol(symbol, venue);
        debug!(symbol = %provider_symbol, "fetching quote upstream");

        let result = self.quote_result(&provider_symbol).await?;
        let price = result
            .get("regularMarketPrice")
            .and_then(serde_json::Value::as_f64)
            .and_then(Decimal::from_f64)
            .ok_or_else(|| {
                DataSourceError::Parse(format!("missing regularMarketPrice for {}", provider_symbol))
            })?;

        Ok(Quote { price })
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataSourceError> {
        let normalized = symbols::normalize(symbol);
        debug!(symbol = %normalized, "serving placeholder fundamentals");
        Ok(placeholder_fundamentals(&normalized))
    }
}

/// Stable pseudo-fundamentals: a P/E ratio in [10.0, 50.0) keyed off the
/// symbol, and the current calendar quarter as the latest reporting period.
fn placeholder_fundamentals(normalized_symbol: &str) -> Fundamentals {
    let mut hasher = DefaultHasher::new();
    normalized_symbol.hash(&mut hasher);
    let tenths = (hasher.finish() % 400) as i64;
    let pe_ratio = Decimal::from_parts(100 + tenths, 1);

    let now = Utc::now();
    let quarter = now.month0() / 3 + 1;
    Fundamentals {
        pe_ratio,
        latest_earnings: format!("Q{} FY{}", quarter, now.year()),
    }
}
