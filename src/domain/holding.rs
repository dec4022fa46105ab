//! Portfolio holding records, raw and enriched.

use super::{Decimal, Venue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One position as submitted by the caller. Immutable once validated;
/// enrichment builds new records rather than mutating these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub purchase_price: Decimal,
    pub qty: Decimal,
    pub venue: Venue,
}

impl Holding {
    fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("symbol must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.sector.trim().is_empty() {
            return Err("sector must not be empty".to_string());
        }
        if !self.purchase_price.is_positive() {
            return Err("purchasePrice must be positive".to_string());
        }
        if !self.qty.is_positive() {
            return Err("qty must be positive".to_string());
        }
        Ok(())
    }
}

/// Rejection of a whole submitted batch, pinned to the first bad record.
#[derive(Debug, Error, PartialEq)]
#[error("invalid holding at index {index}: {reason}")]
pub struct ValidationError {
    pub index: usize,
    pub reason: String,
}

/// Decode and validate a submitted batch. The first malformed element fails
/// the whole batch; there is no partial acceptance.
pub fn validate_batch(raw: &[serde_json::Value]) -> Result<Vec<Holding>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            let holding: Holding =
                serde_json::from_value(value.clone()).map_err(|e| ValidationError {
                    index,
                    reason: e.to_string(),
                })?;
            holding.validate().map_err(|reason| ValidationError {
                index,
                reason,
            })?;
            Ok(holding)
        })
        .collect()
}

/// A holding with derived and live-fetched valuation fields.
///
/// `investment` is always defined. Fields sourced from the upstream provider
/// are optional: a failed fetch leaves them absent rather than failing the
/// record. `stale` marks a live price served from cache instead of a fresh
/// fetch this cycle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    #[serde(flatten)]
    pub holding: Holding,
    pub investment: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain_loss: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_earnings: Option<String>,
    pub stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_percent: Option<Decimal>,
}

impl EnrichedHolding {
    /// Enrichment independent of live data: just the derived investment.
    pub fn from_static(holding: Holding) -> Self {
        let investment = holding.purchase_price * holding.qty;
        Self {
            holding,
            investment,
            live_price: None,
            present_value: None,
            gain_loss: None,
            pe_ratio: None,
            latest_earnings: None,
            stale: false,
            portfolio_percent: None,
        }
    }

    /// Attach a fetched live price and derive the dependent fields.
    pub fn with_live_price(mut self, live_price: Decimal, stale: bool) -> Self {
        let present_value = live_price * self.holding.qty;
        self.gain_loss = Some(present_value - self.investment);
        self.present_value = Some(present_value);
        self.live_price = Some(live_price);
        self.stale = stale;
        self
    }
}
