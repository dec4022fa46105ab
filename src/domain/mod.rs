//! Domain types for portfolio valuation.
//!
//! This module provides:
//! - Exact money math via the Decimal wrapper
//! - Venue primitive and symbol normalization
//! - Holding records, raw and enriched, with batch validation

pub mod decimal;
pub mod holding;
pub mod primitives;
pub mod symbols;

pub use decimal::Decimal;
pub use holding::{validate_batch, EnrichedHolding, Holding, ValidationError};
pub use primitives::{Venue, VenueParseError};
