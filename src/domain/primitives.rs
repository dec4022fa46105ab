//! Domain primitives: trading venue.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Exchange a security trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Venue {
    /// National Stock Exchange.
    Nse,
    /// Bombay Stock Exchange.
    Bse,
}

impl Venue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Nse => "NSE",
            Venue::Bse => "BSE",
        }
    }

    /// Ticker suffix the upstream provider expects for this venue.
    pub fn provider_suffix(&self) -> &'static str {
        match self {
            Venue::Nse => ".NS",
            Venue::Bse => ".BO",
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("venue must be NSE or BSE, got {0}")]
pub struct VenueParseError(String);

impl FromStr for Venue {
    type Err = VenueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NSE" => Ok(Venue::Nse),
            "BSE" => Ok(Venue::Bse),
            other => Err(VenueParseError(other.to_string())),
        }
    }
}
