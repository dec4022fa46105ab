pub mod api;
pub mod cache;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod seed;
pub mod throttle;

pub use cache::TtlCache;
pub use config::Config;
pub use datasource::{
    DataSourceError, Fundamentals, MarketDataSource, MockDataSource, Quote, YahooDataSource,
};
pub use domain::{Decimal, EnrichedHolding, Holding, ValidationError, Venue};
pub use error::AppError;
pub use orchestration::{Enricher, Fetched, MarketDataFetcher};
pub use throttle::{ConcurrencyLimiter, RetryPolicy};
