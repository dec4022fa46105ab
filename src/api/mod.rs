pub mod health;
pub mod metrics;
pub mod portfolio;
pub mod quote;

use crate::domain::Venue;
use crate::error::AppError;
use crate::orchestration::{Enricher, MarketDataFetcher};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<MarketDataFetcher>,
    pub enricher: Arc<Enricher>,
}

impl AppState {
    pub fn new(fetcher: Arc<MarketDataFetcher>, enricher: Arc<Enricher>) -> Self {
        Self { fetcher, enricher }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route(
            "/v1/portfolio",
            get(portfolio::get_portfolio).post(portfolio::post_portfolio),
        )
        .route("/v1/quote", get(quote::get_quote))
        .route("/v1/metrics", get(metrics::get_metrics))
        .layer(cors)
        .with_state(state)
}

/// Shared validation for the single-security endpoints: both query params are
/// required and the venue must be one of the enumerated set.
fn require_symbol_and_venue(
    symbol: Option<&str>,
    venue: Option<&str>,
) -> Result<(String, Venue), AppError> {
    let symbol = symbol
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing required parameter: symbol".to_string()))?;
    let venue = venue
        .ok_or_else(|| AppError::BadRequest("missing required parameter: venue".to_string()))?
        .parse::<Venue>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok((symbol.to_string(), venue))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_symbol_and_venue_accepts_valid() {
        let (symbol, venue) = require_symbol_and_venue(Some("INFY"), Some("NSE")).unwrap();
        assert_eq!(symbol, "INFY");
        assert_eq!(venue, Venue::Nse);
    }

    #[test]
    fn test_require_symbol_and_venue_rejects_missing() {
        assert!(require_symbol_and_venue(None, Some("NSE")).is_err());
        assert!(require_symbol_and_venue(Some("INFY"), None).is_err());
        assert!(require_symbol_and_venue(Some("  "), Some("NSE")).is_err());
    }

    #[test]
    fn test_require_symbol_and_venue_rejects_unknown_venue() {
        let err = require_symbol_and_venue(Some("INFY"), Some("NYSE")).unwrap_err();
        assert!(err.to_string().contains("NSE or BSE"));
    }
}
