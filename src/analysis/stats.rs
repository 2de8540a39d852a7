//! Price parsing and aggregate price statistics.

use crate::store::ProductRecord;
use serde::Serialize;
use std::fmt;

/// Parses loosely formatted price text into a positive number.
///
/// Every character that is not an ASCII digit or `.` is dropped before
/// parsing, so `"$1,299.00"` reads as `1299.0`. Text that leaves nothing
/// parseable (`"Free"`), or a value that is not positive, yields `None`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|value| value.is_finite() && *value > 0.0)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Min/avg/max over the products that carry a readable price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PriceStats {
    Available {
        min: f64,
        max: f64,
        avg: f64,
        /// Unrounded average; pricing tiers compare against this
        #[serde(skip)]
        mean: f64,
        /// Number of products the figures are computed from
        priced: usize,
    },
    /// No product had a readable price.
    Unavailable,
}

impl PriceStats {
    /// Computes statistics over `products`. Order does not matter.
    pub fn from_products(products: &[ProductRecord]) -> Self {
        let prices: Vec<f64> = products.iter().filter_map(ProductRecord::price_value).collect();
        Self::from_prices(&prices)
    }

    /// Computes statistics over already parsed prices.
    pub fn from_prices(prices: &[f64]) -> Self {
        if prices.is_empty() {
            return PriceStats::Unavailable;
        }

        let sum: f64 = prices.iter().sum();
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mean = sum / prices.len() as f64;

        PriceStats::Available {
            min: round2(min),
            max: round2(max),
            avg: round2(mean),
            mean,
            priced: prices.len(),
        }
    }

    /// Average price, if available.
    pub fn avg(&self) -> Option<f64> {
        match self {
            PriceStats::Available { avg, .. } => Some(*avg),
            PriceStats::Unavailable => None,
        }
    }

    /// Average price before rounding, if available.
    pub fn mean(&self) -> Option<f64> {
        match self {
            PriceStats::Available { mean, .. } => Some(*mean),
            PriceStats::Unavailable => None,
        }
    }

    /// Lowest price, if available.
    pub fn min(&self) -> Option<f64> {
        match self {
            PriceStats::Available { min, .. } => Some(*min),
            PriceStats::Unavailable => None,
        }
    }

    /// Highest price, if available.
    pub fn max(&self) -> Option<f64> {
        match self {
            PriceStats::Available { max, .. } => Some(*max),
            PriceStats::Unavailable => None,
        }
    }

    /// Number of priced products (0 when unavailable).
    pub fn priced(&self) -> usize {
        match self {
            PriceStats::Available { priced, .. } => *priced,
            PriceStats::Unavailable => 0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PriceStats::Available { .. })
    }
}

/// Formats an optional figure as `"12.34"` or `"unavailable"`.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "unavailable".to_string(),
    }
}

impl fmt::Display for PriceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceStats::Available { min, max, avg, .. } => {
                write!(f, "min {:.2} / avg {:.2} / max {:.2}", min, avg, max)
            }
            PriceStats::Unavailable => write!(f, "unavailable"),
        }
    }
}
