use crate::api::{require_symbol_and_venue, AppState};
use crate::domain::{symbols, Decimal};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    pub symbol: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub symbol: String,
    pub pe_ratio: Decimal,
    pub latest_earnings: String,
    pub from_cache: bool,
    pub as_of: DateTime<Utc>,
}

pub async fn get_metrics(
    Query(params): Query<MetricsQuery>,
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, AppError> {
    let (symbol, _venue) =
        require_symbol_and_venue(params.symbol.as_deref(), params.venue.as_deref())?;

    let fetched = state
        .fetcher
        .fundamentals(&symbol)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(MetricsResponse {
        symbol: symbols::normalize(&symbol),
        pe_ratio: fetched.value.pe_ratio,
        latest_earnings: fetched.value.latest_earnings,
        from_cache: fetched.stale,
        as_of: Utc::now(),
    }))
}
