//! Mock data source for testing without network calls.

use super::{DataSourceError, Fundamentals, MarketDataSource, Quote};
use crate::domain::{symbols, Decimal, Venue};
use async_trait::async_trait;
use std::collections::HashMap;

/// Data source returning predefined quotes and fundamentals.
///
/// Lookups are keyed by normalized symbol; an unknown symbol fails with a
/// permanent error, so tests exercising degradation paths finish without
/// backoff sleeps.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource {
    quotes: HashMap<String, Decimal>,
    fundamentals: HashMap<String, Fundamentals>,
}

impl MockDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, price: Decimal) -> Self {
        self.quotes.insert(symbols::normalize(symbol), price);
        self
    }

    pub fn with_fundamentals(mut self, symbol: &str, pe_ratio: Decimal, latest_earnings: &str) -> Self {
        self.fundamentals.insert(
            symbols::normalize(symbol),
            Fundamentals {
                pe_ratio,
                latest_earnings: latest_earnings.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl MarketDataSource for MockDataSource {
    async fn fetch_quote(&self, symbol: &str, _venue: Venue) -> Result<Quote, DataSourceError> {
        self.quotes
            .get(&symbols::normalize(symbol))
            .map(|price| Quote { price: *price })
            .ok_or_else(|| DataSourceError::Other(format!("no quote for {}", symbol)))
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataSourceError> {
        self.fundamentals
            .get(&symbols::normalize(symbol))
            .cloned()
            .ok_or_else(|| DataSourceError::Other(format!("no fundamentals for {}", symbol)))
    }
}
