use crate::api::AppState;
use crate::domain::{validate_batch, Decimal, EnrichedHolding};
use crate::engine::{group_by_sector, ValuationTotals};
use crate::error::AppError;
use crate::seed;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub holdings: Vec<EnrichedHolding>,
    pub totals: PortfolioTotals,
    pub sectors: BTreeMap<String, SectorBreakdown>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_investment: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_present_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_gain_loss: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_gain_loss_percent: Option<Decimal>,
}

impl From<ValuationTotals> for PortfolioTotals {
    fn from(totals: ValuationTotals) -> Self {
        Self {
            total_investment: totals.investment,
            total_present_value: totals.present_value,
            total_gain_loss: totals.gain_loss,
            total_gain_loss_percent: totals.gain_loss_percent,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorBreakdown {
    pub holdings: Vec<EnrichedHolding>,
    #[serde(flatten)]
    pub totals: ValuationTotals,
}

/// Enrich a submitted portfolio with live data.
///
/// The body is an optional JSON array of holdings; a missing body, a body
/// that fails to parse, or a non-array payload all fall back to the seed
/// dataset. A well-formed array with an invalid element rejects the whole
/// batch, naming the offending index.
pub async fn post_portfolio(
    State(state): State<AppState>,
    body: Option<Json<serde_json::Value>>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let holdings = match body {
        Some(Json(serde_json::Value::Array(items))) => validate_batch(&items)?,
        _ => seed::default_holdings(),
    };

    info!(count = holdings.len(), "enriching portfolio");
    let enriched = state.enricher.enrich(holdings).await;
    Ok(Json(build_response(enriched)))
}

/// Static valuation of the seed dataset: derived fields only, no live
/// fetches.
pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let enriched = state.enricher.enrich_static(seed::default_holdings());
    Ok(Json(build_response(enriched)))
}

fn build_response(holdings: Vec<EnrichedHolding>) -> PortfolioResponse {
    let sectors = group_by_sector(&holdings)
        .into_iter()
        .map(|(sector, members)| {
            let totals = ValuationTotals::compute(&members);
            (
                sector,
                SectorBreakdown {
                    holdings: members,
                    totals,
                },
            )
        })
        .collect();

    let totals = ValuationTotals::compute(&holdings).into();

    PortfolioResponse {
        holdings,
        totals,
        sectors,
        last_updated: Utc::now(),
    }
}
