//! Data source abstraction for fetching quotes and fundamentals from the
//! upstream market-data provider.

use crate::domain::{Decimal, Venue};
use crate::throttle::Transient;
use async_trait::async_trait;
use std::fmt;

pub mod mock;
pub mod yahoo;

pub use mock::MockDataSource;
pub use yahoo::YahooDataSource;

/// A live quote for one security.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub price: Decimal,
}

/// Slow-moving fundamentals for one security.
#[derive(Debug, Clone, PartialEq)]
pub struct Fundamentals {
    pub pe_ratio: Decimal,
    /// Label of the most recent reporting period, e.g. "Q1 FY2026".
    pub latest_earnings: String,
}

/// Market data provider boundary.
///
/// Implementations are plain fallible fetches: caching, admission control,
/// and retry all live in the orchestration layer, so a call here is exactly
/// one upstream round trip.
#[async_trait]
pub trait MarketDataSource: Send + Sync + fmt::Debug {
    /// Fetch the current price for a symbol on a venue.
    async fn fetch_quote(&self, symbol: &str, venue: Venue) -> Result<Quote, DataSourceError>;

    /// Fetch fundamentals for a symbol.
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals, DataSourceError>;
}

/// Error type for data source operations, tagged for retry classification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataSourceError {
    /// Transport failure (connection refused, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status from the provider.
    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },
    /// Response arrived but its shape was not usable.
    #[error("parse error: {0}")]
    Parse(String),
    /// Provider signalled too many requests.
    #[error("rate limited")]
    RateLimited,
    #[error("{0}")]
    Other(String),
}

impl Transient for DataSourceError {
    /// Network faults, throttling, and server errors are worth retrying;
    /// client errors and malformed payloads will not improve on a second
    /// attempt.
    fn is_transient(&self) -> bool {
        match self {
            DataSourceError::Network(_) | DataSourceError::RateLimited => true,
            DataSourceError::Http { status, .. } => (500..=599).contains(status),
            DataSourceError::Parse(_) | DataSourceError::Other(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataSourceError::Network("connection timeout".to_string());
        assert_eq!(err.to_string(), "network error: connection timeout");

        let err = DataSourceError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "http error 503: unavailable");

        assert_eq!(DataSourceError::RateLimited.to_string(), "rate limited");
    }

    #[test]
    fn test_transient_classification() {
        assert!(DataSourceError::Network("x".into()).is_transient());
        assert!(DataSourceError::RateLimited.is_transient());
        assert!(DataSourceError::Http {
            status: 500,
            message: String::new()
        }
        .is_transient());
        assert!(!DataSourceError::Http {
            status: 404,
            message: String::new()
        }
        .is_transient());
        assert!(!DataSourceError::Parse("bad json".into()).is_transient());
        assert!(!DataSourceError::Other("no data".into()).is_transient());
    }
}
