//! Portfolio enrichment pipeline.

use super::MarketDataFetcher;
use crate::domain::{Decimal, EnrichedHolding, Holding};
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// Enriches validated holdings with live prices and fundamentals.
///
/// All per-holding fetches run concurrently, bounded only by the fetcher's
/// limiter, and the output preserves input order. Failure is isolated twice
/// over: the quote and fundamentals fetches for one holding are independent
/// of each other, and no holding's failure touches its siblings. A fetch
/// that exhausts its retries just leaves that holding's live fields absent.
#[derive(Debug)]
pub struct Enricher {
    fetcher: Arc<MarketDataFetcher>,
}

impl Enricher {
    pub fn new(fetcher: Arc<MarketDataFetcher>) -> Self {
        Self { fetcher }
    }

    /// Full enrichment: live data plus portfolio-share percentages.
    pub async fn enrich(&self, holdings: Vec<Holding>) -> Vec<EnrichedHolding> {
        let tasks = holdings.into_iter().map(|h| self.enrich_one(h));
        let mut enriched = join_all(tasks).await;

        let total_investment: Decimal = enriched.iter().map(|h| h.investment).sum();
        if total_investment.is_positive() {
            for holding in &mut enriched {
                holding.portfolio_percent =
                    Some(holding.investment / total_investment * Decimal::hundred());
            }
        }
        enriched
    }

    /// Enrichment without live fetches: derived investment only.
    pub fn enrich_static(&self, holdings: Vec<Holding>) -> Vec<EnrichedHolding> {
        holdings
            .into_iter()
            .map(EnrichedHolding::from_static)
            .collect()
    }

    async fn enrich_one(&self, holding: Holding) -> EnrichedHolding {
        let (quote, fundamentals) = tokio::join!(
            self.fetcher.quote(&holding.symbol, holding.venue),
            self.fetcher.fundamentals(&holding.symbol),
        );

        let mut enriched = EnrichedHolding::from_static(holding);

        match quote {
            Ok(fetched) => {
                enriched = enriched.with_live_price(fetched.value.price, fetched.stale);
            }
            Err(err) => {
                warn!(symbol = %enriched.holding.symbol, error = %err, "quote fetch failed");
            }
        }

        match fundamentals {
            Ok(fetched) => {
                enriched.pe_ratio = Some(fetched.value.pe_ratio);
                enriched.latest_earnings = Some(fetched.value.latest_earnings);
            }
            Err(err) => {
                warn!(symbol = %enriched.holding.symbol, error = %err, "fundamentals fetch failed");
            }
        }

        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::MockDataSource;
    use crate::domain::Venue;
    use crate::throttle::{ConcurrencyLimiter, RetryPolicy};
    use std::time::Duration;

    fn holding(symbol: &str, sector: &str, price: i64, qty: i64) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            sector: sector.to_string(),
            purchase_price: Decimal::from(price),
            qty: Decimal::from(qty),
            venue: Venue::Nse,
        }
    }

    fn enricher_over(source: MockDataSource) -> Enricher {
        let fetcher = MarketDataFetcher::new(
            Arc::new(source),
            Arc::new(ConcurrencyLimiter::new(5)),
            RetryPolicy::default(),
            Duration::from_secs(15),
            Duration::from_secs(12 * 60 * 60),
        );
        Enricher::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_enrich_merges_live_data() {
        let source = MockDataSource::new()
            .with_quote("INFY", Decimal::from(120))
            .with_fundamentals("INFY", Decimal::from_parts(245, 1), "Q1 FY2026");
        let enricher = enricher_over(source);

        let enriched = enricher.enrich(vec![holding("INFY", "Tech", 100, 10)]).await;
        assert_eq!(enriched.len(), 1);
        let h = &enriched[0];
        assert_eq!(h.investment, Decimal::from(1000));
        assert_eq!(h.live_price, Some(Decimal::from(120)));
        assert_eq!(h.present_value, Some(Decimal::from(1200)));
        assert_eq!(h.gain_loss, Some(Decimal::from(200)));
        assert_eq!(h.pe_ratio, Some(Decimal::from_parts(245, 1)));
        assert_eq!(h.latest_earnings.as_deref(), Some("Q1 FY2026"));
        assert_eq!(h.portfolio_percent, Some(Decimal::hundred()));
        assert!(!h.stale);
    }

    #[tokio::test]
    async fn test_quote_failure_leaves_record_with_static_fields() {
        // fundamentals known, quote unknown: one failing fetch must not
        // affect the other
        let source =
            MockDataSource::new().with_fundamentals("INFY", Decimal::from(20), "Q1 FY2026");
        let enricher = enricher_over(source);

        let enriched = enricher.enrich(vec![holding("INFY", "Tech", 100, 10)]).await;
        let h = &enriched[0];
        assert_eq!(h.investment, Decimal::from(1000));
        assert_eq!(h.live_price, None);
        assert_eq!(h.present_value, None);
        assert_eq!(h.gain_loss, None);
        assert_eq!(h.pe_ratio, Some(Decimal::from(20)));
        assert_eq!(h.portfolio_percent, Some(Decimal::hundred()));
    }

    #[tokio::test]
    async fn test_one_failing_symbol_does_not_abort_siblings() {
        let source = MockDataSource::new().with_quote("GOOD", Decimal::from(50));
        let enricher = enricher_over(source);

        let enriched = enricher
            .enrich(vec![
                holding("BAD", "Tech", 100, 10),
                holding("GOOD", "Tech", 40, 10),
            ])
            .await;

        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].holding.symbol, "BAD");
        assert_eq!(enriched[0].present_value, None);
        assert_eq!(enriched[1].present_value, Some(Decimal::from(500)));
    }

    #[tokio::test]
    async fn test_output_preserves_input_order() {
        let source = MockDataSource::new()
            .with_quote("A", Decimal::from(1))
            .with_quote("B", Decimal::from(2))
            .with_quote("C", Decimal::from(3));
        let enricher = enricher_over(source);

        let enriched = enricher
            .enrich(vec![
                holding("C", "X", 1, 1),
                holding("A", "X", 1, 1),
                holding("B", "X", 1, 1),
            ])
            .await;
        let symbols: Vec<&str> = enriched.iter().map(|h| h.holding.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_portfolio_percent_splits_by_investment() {
        let enricher = enricher_over(MockDataSource::new());

        let enriched = enricher
            .enrich(vec![
                holding("A", "X", 100, 3), // 300
                holding("B", "X", 100, 1), // 100
            ])
            .await;
        assert_eq!(enriched[0].portfolio_percent, Some(Decimal::from(75)));
        assert_eq!(enriched[1].portfolio_percent, Some(Decimal::from(25)));
    }

    #[tokio::test]
    async fn test_enrich_static_has_no_live_fields_or_percent() {
        let enricher = enricher_over(MockDataSource::new());
        let enriched = enricher.enrich_static(vec![holding("A", "X", 100, 10)]);
        assert_eq!(enriched[0].investment, Decimal::from(1000));
        assert_eq!(enriched[0].live_price, None);
        assert_eq!(enriched[0].portfolio_percent, None);
    }

    #[tokio::test]
    async fn test_second_pass_marks_quotes_stale() {
        let source = MockDataSource::new().with_quote("A", Decimal::from(10));
        let enricher = enricher_over(source);

        let first = enricher.enrich(vec![holding("A", "X", 1, 1)]).await;
        assert!(!first[0].stale);
        let second = enricher.enrich(vec![holding("A", "X", 1, 1)]).await;
        assert!(second[0].stale);
    }
}
