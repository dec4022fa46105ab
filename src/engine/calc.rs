//! Valuation folds over enriched holdings.

use crate::domain::{Decimal, EnrichedHolding};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated valuation of a set of holdings (one sector or the whole
/// portfolio).
///
/// The present-value sum is defined only when at least one member defines a
/// present value; members without one are skipped, not counted as zero. The
/// derived gain/loss fields follow the same presence rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationTotals {
    pub investment: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub present_value: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain_loss: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain_loss_percent: Option<Decimal>,
}

impl ValuationTotals {
    pub fn compute(holdings: &[EnrichedHolding]) -> Self {
        let investment: Decimal = holdings.iter().map(|h| h.investment).sum();

        let present_values: Vec<Decimal> =
            holdings.iter().filter_map(|h| h.present_value).collect();
        let present_value = if present_values.is_empty() {
            None
        } else {
            Some(present_values.into_iter().sum())
        };

        let gain_loss = present_value.map(|pv| pv - investment);
        let gain_loss_percent = match gain_loss {
            Some(gl) if investment.is_positive() => {
                Some(gl / investment * Decimal::hundred())
            }
            _ => None,
        };

        Self {
            investment,
            present_value,
            gain_loss,
            gain_loss_percent,
        }
    }
}

/// Group holdings by sector. A BTreeMap keeps emission order deterministic.
pub fn group_by_sector(holdings: &[EnrichedHolding]) -> BTreeMap<String, Vec<EnrichedHolding>> {
    let mut groups: BTreeMap<String, Vec<EnrichedHolding>> = BTreeMap::new();
    for holding in holdings {
        groups
            .entry(holding.holding.sector.clone())
            .or_default()
            .push(holding.clone());
    }
    groups
}
