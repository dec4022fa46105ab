use crate::api::{require_symbol_and_venue, AppState};
use crate::domain::{symbols, Decimal, Venue};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub symbol: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub symbol: String,
    pub price: Decimal,
    pub venue: Venue,
    pub from_cache: bool,
    pub as_of: DateTime<Utc>,
}

pub async fn get_quote(
    Query(params): Query<QuoteQuery>,
    State(state): State<AppState>,
) -> Result<Json<QuoteResponse>, AppError> {
    let (symbol, venue) =
        require_symbol_and_venue(params.symbol.as_deref(), params.venue.as_deref())?;

    let fetched = state
        .fetcher
        .quote(&symbol, venue)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(QuoteResponse {
        symbol: symbols::normalize(&symbol),
        price: fetched.value.price,
        venue,
        from_cache: fetched.stale,
        as_of: Utc::now(),
    }))
}
