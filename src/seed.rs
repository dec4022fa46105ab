//! Built-in holdings served when a request carries no portfolio of its own.

use crate::domain::{Decimal, Holding, Venue};

fn holding(
    symbol: &str,
    name: &str,
    sector: &str,
    purchase_price: Decimal,
    qty: i64,
    venue: Venue,
) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        purchase_price,
        qty: Decimal::from(qty),
        venue,
    }
}

/// The fallback dataset: a small large-cap portfolio across sectors.
pub fn default_holdings() -> Vec<Holding> {
    vec![
        holding(
            "RELIANCE",
            "Reliance Industries",
            "Energy",
            Decimal::from_parts(24505, 1),
            10,
            Venue::Nse,
        ),
        holding(
            "TCS",
            "Tata Consultancy Services",
            "Technology",
            Decimal::from_parts(33402, 1),
            5,
            Venue::Nse,
        ),
        holding(
            "INFY",
            "Infosys",
            "Technology",
            Decimal::from_parts(14653, 1),
            12,
            Venue::Nse,
        ),
        holding(
            "HDFCBANK",
            "HDFC Bank",
            "Banking",
            Decimal::from_parts(15908, 1),
            15,
            Venue::Nse,
        ),
        holding(
            "ICICIBANK",
            "ICICI Bank",
            "Banking",
            Decimal::from_parts(9451, 1),
            20,
            Venue::Nse,
        ),
        holding(
            "ITC",
            "ITC Limited",
            "Consumer Goods",
            Decimal::from_parts(4383, 1),
            40,
            Venue::Nse,
        ),
        holding(
            "BHARTIARTL",
            "Bharti Airtel",
            "Telecom",
            Decimal::from_parts(8722, 1),
            18,
            Venue::Nse,
        ),
        holding(
            "SUNPHARMA",
            "Sun Pharmaceutical",
            "Pharma",
            Decimal::from_parts(11239, 1),
            8,
            Venue::Bse,
        ),
    ]
}
