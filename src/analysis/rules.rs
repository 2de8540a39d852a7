//! Rule table turning catalog size and price level into advice lines.

use crate::analysis::stats::PriceStats;
use crate::store::Platform;

/// Catalogs above this many products count as large.
pub const LARGE_CATALOG: usize = 50;

/// Average price above which a store is considered premium.
pub const PREMIUM_AVG: f64 = 100.0;

/// Average price above which a store is considered mid-range.
pub const MID_RANGE_AVG: f64 = 50.0;

/// Pricing tier derived from the average price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTier {
    Premium,
    MidRange,
    Budget,
    Unknown,
}

impl PriceTier {
    /// Classifies on the unrounded mean so a mean just above a threshold is
    /// not pulled back onto it by rounding.
    pub fn from_stats(stats: &PriceStats) -> Self {
        match stats.mean() {
            Some(avg) if avg > PREMIUM_AVG => PriceTier::Premium,
            Some(avg) if avg > MID_RANGE_AVG => PriceTier::MidRange,
            Some(_) => PriceTier::Budget,
            None => PriceTier::Unknown,
        }
    }
}

/// Lines produced by the rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutput {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Applies the rule table.
pub fn evaluate(product_count: usize, stats: &PriceStats, platform: Platform) -> RuleOutput {
    let mut out = RuleOutput::default();

    if product_count > LARGE_CATALOG {
        out.insights.push(format!("Large catalog with {} products listed.", product_count));
        out.recommendations.push(
            "Organize the catalog into curated collections and add filters so shoppers find products faster."
                .to_string(),
        );
    } else {
        out.insights.push(format!("Focused catalog with {} products listed.", product_count));
        out.recommendations.push(
            "Consider expanding the product range to capture more search traffic.".to_string(),
        );
    }

    match PriceTier::from_stats(stats) {
        PriceTier::Premium => {
            out.insights.push(format!(
                "Premium pricing tier (average price {:.2}).",
                stats.avg().unwrap_or_default()
            ));
            out.recommendations.push(
                "Back premium prices with detailed photography and clear guarantees.".to_string(),
            );
        }
        PriceTier::MidRange => {
            out.insights.push(format!(
                "Mid-range pricing tier (average price {:.2}).",
                stats.avg().unwrap_or_default()
            ));
            out.recommendations.push(
                "Offer bundles or a free-shipping threshold to lift average order value."
                    .to_string(),
            );
        }
        PriceTier::Budget => {
            out.insights.push(format!(
                "Budget pricing tier (average price {:.2}).",
                stats.avg().unwrap_or_default()
            ));
            out.recommendations.push(
                "Use volume discounts and multi-buy offers to raise basket size.".to_string(),
            );
        }
        PriceTier::Unknown => {
            out.insights.push("Prices could not be read from the storefront.".to_string());
            out.recommendations.push(
                "Show prices on collection pages so shoppers can compare at a glance.".to_string(),
            );
        }
    }

    let unpriced = product_count.saturating_sub(stats.priced());
    if stats.is_available() && unpriced > 0 {
        out.insights.push(format!("{} of {} products show no readable price.", unpriced, product_count));
    }

    if !platform.is_known() {
        out.insights.push("Storefront platform could not be identified from the URL.".to_string());
    }

    out.recommendations.push("Optimize product titles for search visibility.".to_string());

    out
}
