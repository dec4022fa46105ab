//! Pure computation over enriched holdings: grouping and valuation totals.

pub mod calc;

pub use calc::{group_by_sector, ValuationTotals};
