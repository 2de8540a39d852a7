//! Analysis report built from extracted products.

use crate::analysis::rules;
use crate::analysis::stats::{format_amount, PriceStats};
use crate::store::{Platform, ProductRecord};
use serde::Serialize;

/// Summary of one storefront, computed fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub store_url: String,
    pub product_count: usize,
    /// Products whose price could be read
    pub priced_count: usize,
    pub price_stats: PriceStats,
    pub platform: Platform,
    pub insight_lines: Vec<String>,
    pub recommendation_lines: Vec<String>,
}

impl AnalysisReport {
    /// Summarizes `products` scraped from `store_url`.
    pub fn summarize(products: &[ProductRecord], store_url: &str) -> Self {
        let price_stats = PriceStats::from_products(products);
        let platform = Platform::guess(store_url);
        let rules = rules::evaluate(products.len(), &price_stats, platform);

        Self {
            store_url: store_url.to_string(),
            product_count: products.len(),
            priced_count: price_stats.priced(),
            price_stats,
            platform,
            insight_lines: rules.insights,
            recommendation_lines: rules.recommendations,
        }
    }

    /// Renders the plain-text report, closing with the AI commentary.
    pub fn render(&self, commentary: &str) -> String {
        let mut lines = Vec::new();

        lines.push("STORE ANALYSIS".to_string());
        lines.push("==============".to_string());
        lines.push(String::new());
        lines.push(format!("Store:          {}", self.store_url));
        lines.push(format!("Platform:       {}", self.platform));
        lines.push(format!("Products found: {}", self.product_count));
        lines.push(format!("Priced:         {}", self.priced_count));
        lines.push(format!("Average price:  {}", format_amount(self.price_stats.avg())));
        lines.push(format!(
            "Price range:    {}",
            match (self.price_stats.min(), self.price_stats.max()) {
                (Some(min), Some(max)) => format!("{:.2} - {:.2}", min, max),
                _ => "unavailable".to_string(),
            }
        ));

        lines.push(String::new());
        lines.push("Insights:".to_string());
        lines.extend(self.insight_lines.iter().map(|l| format!("- {}", l)));

        lines.push(String::new());
        lines.push("Recommendations:".to_string());
        lines.extend(self.recommendation_lines.iter().map(|l| format!("- {}", l)));

        lines.push(String::new());
        lines.push("AI Commentary:".to_string());
        lines.push(commentary.trim().to_string());

        lines.join("\n")
    }
}
