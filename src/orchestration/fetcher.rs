//! Cached, rate-limited access to the upstream market-data provider.

use crate::cache::TtlCache;
use crate::datasource::{DataSourceError, Fundamentals, MarketDataSource, Quote};
use crate::domain::{symbols, Venue};
use crate::throttle::{ConcurrencyLimiter, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A fetch result paired with where it came from: `stale` is true when the
/// value was served from cache rather than freshly fetched this cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub stale: bool,
}

/// The single chokepoint for upstream calls.
///
/// Every fetch consults the cache first; a hit returns immediately without
/// consuming a limiter slot. On a miss the call is admitted by the
/// concurrency limiter and retried per policy inside that one slot, and a
/// success is written back with the TTL for its data kind. Quotes are
/// short-lived; fundamentals change rarely and cache for hours.
#[derive(Debug)]
pub struct MarketDataFetcher {
    source: Arc<dyn MarketDataSource>,
    limiter: Arc<ConcurrencyLimiter>,
    retry: RetryPolicy,
    quote_cache: TtlCache<Quote>,
    fundamentals_cache: TtlCache<Fundamentals>,
    quote_ttl: Duration,
    fundamentals_ttl: Duration,
}

impl MarketDataFetcher {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        limiter: Arc<ConcurrencyLimiter>,
        retry: RetryPolicy,
        quote_ttl: Duration,
        fundamentals_ttl: Duration,
    ) -> Self {
        Self {
            source,
            limiter,
            retry,
            quote_cache: TtlCache::new(),
            fundamentals_cache: TtlCache::new(),
            quote_ttl,
            fundamentals_ttl,
        }
    }

    pub async fn quote(
        &self,
        symbol: &str,
        venue: Venue,
    ) -> Result<Fetched<Quote>, DataSourceError> {
        let key = symbols::quote_key(symbol, venue);
        if let Some(quote) = self.quote_cache.get(&key) {
            debug!(%key, "quote served from cache");
            return Ok(Fetched {
                value: quote,
                stale: true,
            });
        }

        debug!(%key, in_flight = self.limiter.in_flight(), "quote cache miss");
        let quote = self
            .limiter
            .run(self.retry.run(|| self.source.fetch_quote(symbol, venue)))
            .await?;
        self.quote_cache.set(&key, quote.clone(), self.quote_ttl);
        Ok(Fetched {
            value: quote,
            stale: false,
        })
    }

    pub async fn fundamentals(
        &self,
        symbol: &str,
    ) -> Result<Fetched<Fundamentals>, DataSourceError> {
        let key = symbols::fundamentals_key(symbol);
        if let Some(fundamentals) = self.fundamentals_cache.get(&key) {
            debug!(%key, "fundamentals served from cache");
            return Ok(Fetched {
                value: fundamentals,
                stale: true,
            });
        }

        debug!(%key, in_flight = self.limiter.in_flight(), "fundamentals cache miss");
        let fundamentals = self
            .limiter
            .run(self.retry.run(|| self.source.fetch_fundamentals(symbol)))
            .await?;
        self.fundamentals_cache
            .set(&key, fundamentals.clone(), self.fundamentals_ttl);
        Ok(Fetched {
            value: fundamentals,
            stale: false,
        })
    }

    /// Evict expired entries from both caches; returns how many went.
    pub fn sweep_expired(&self) -> usize {
        self.quote_cache.cleanup() + self.fundamentals_cache.cleanup()
    }
}
