//! Symbol normalization and cache-key derivation.
//!
//! Symbols arrive in whatever casing the caller typed. Everything downstream
//! (cache keys, provider tickers) works on the normalized form: trimmed,
//! uppercased, with a small alias table folding informal index names onto
//! their listed tickers.

use super::Venue;

/// Informal spellings mapped onto the symbol the provider lists.
const SYMBOL_ALIASES: &[(&str, &str)] = &[
    ("NIFTY50", "NIFTY"),
    ("NIFTYBANK", "BANKNIFTY"),
    ("BSESENSEX", "SENSEX"),
];

/// Index symbols quoted bare, without a venue suffix.
const INDEX_SYMBOLS: &[&str] = &["NIFTY", "BANKNIFTY", "SENSEX"];

/// Trim, uppercase, and apply the alias table.
pub fn normalize(symbol: &str) -> String {
    let clean = symbol.trim().to_ascii_uppercase();
    for (alias, canonical) in SYMBOL_ALIASES {
        if clean == *alias {
            return (*canonical).to_string();
        }
    }
    clean
}

/// Ticker to send upstream: normalized symbol plus the venue suffix, except
/// for index symbols which the provider lists bare.
pub fn provider_symbol(symbol: &str, venue: Venue) -> String {
    let normalized = normalize(symbol);
    if INDEX_SYMBOLS.contains(&normalized.as_str()) {
        return normalized;
    }
    format!("{}{}", normalized, venue.provider_suffix())
}

/// Cache key for a live quote. Quotes differ per venue, so the venue is part
/// of the key.
pub fn quote_key(symbol: &str, venue: Venue) -> String {
    format!("quote:{}:{}", normalize(symbol), venue)
}

/// Cache key for fundamentals, which are per security rather than per venue.
pub fn fundamentals_key(symbol: &str) -> String {
    format!("fundamentals:{}", normalize(symbol))
}
