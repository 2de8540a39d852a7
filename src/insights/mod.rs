//! AI commentary on an analyzed storefront.
//!
//! The text-completion service is opaque: whatever goes wrong there, the
//! analysis still succeeds and carries [`PLACEHOLDER`] instead.

pub mod openai;

use crate::analysis::stats::format_amount;
use crate::analysis::AnalysisReport;
use crate::error::InsightError;
use crate::store::ProductRecord;
use async_trait::async_trait;

pub use openai::OpenAiClient;

/// Text used when no commentary could be obtained.
pub const PLACEHOLDER: &str = "No insights returned from AI.";

/// Trait for text-completion backends - enables mocking for tests.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Returns the completion for `prompt`, or `None` if the service had nothing to say.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, InsightError>;
}

/// Generator used when no API key is configured.
pub struct DisabledInsights;

#[async_trait]
impl InsightGenerator for DisabledInsights {
    async fn generate(&self, _prompt: &str) -> Result<Option<String>, InsightError> {
        Ok(None)
    }
}

/// Outcome of asking the generator for commentary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commentary {
    Generated(String),
    /// The service answered but returned no text.
    Empty,
    /// The service call failed; the reason is kept for logging only.
    Failed(String),
}

impl Commentary {
    /// Folds a generator result into a commentary value.
    pub fn from_result(result: Result<Option<String>, InsightError>) -> Self {
        match result {
            Ok(Some(text)) if !text.trim().is_empty() => Commentary::Generated(text),
            Ok(_) => Commentary::Empty,
            Err(e) => Commentary::Failed(e.to_string()),
        }
    }

    /// Text to show the user.
    pub fn text(&self) -> &str {
        match self {
            Commentary::Generated(text) => text,
            Commentary::Empty | Commentary::Failed(_) => PLACEHOLDER,
        }
    }
}

/// Builds the completion prompt from the product list and statistics.
pub fn build_prompt(report: &AnalysisReport, products: &[ProductRecord], max_products: usize) -> String {
    let mut prompt = String::from(
        "Analyze this e-commerce store and give actionable advice based on these products:\n",
    );

    for product in products.iter().take(max_products) {
        prompt.push_str(&format!(
            "- {} | {}\n",
            product.title,
            product.price.as_deref().unwrap_or("")
        ));
    }

    if products.len() > max_products {
        prompt.push_str(&format!("(and {} more)\n", products.len() - max_products));
    }

    prompt.push_str(&format!(
        "\nStore: {} (platform: {}). {} products, average price {}.",
        report.store_url,
        report.platform,
        report.product_count,
        format_amount(report.price_stats.avg()),
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(n: usize) -> Vec<ProductRecord> {
        (0..n)
            .map(|i| {
                ProductRecord::new(
                    format!("Item {}", i),
                    format!("https://shop.example/products/{}", i),
                    Some(format!("${}.00", i + 1)),
                )
            })
            .collect()
    }

    #[test]
    fn test_commentary_from_result() {
        assert_eq!(
            Commentary::from_result(Ok(Some("Great store".to_string()))),
            Commentary::Generated("Great store".to_string())
        );
        assert_eq!(Commentary::from_result(Ok(None)), Commentary::Empty);
        assert_eq!(Commentary::from_result(Ok(Some("  ".to_string()))), Commentary::Empty);

        let failed = Commentary::from_result(Err(InsightError::Status { status: 401 }));
        assert!(matches!(failed, Commentary::Failed(ref reason) if reason.contains("401")));
    }

    #[test]
    fn test_commentary_text() {
        assert_eq!(Commentary::Generated("Tip".to_string()).text(), "Tip");
        assert_eq!(Commentary::Empty.text(), PLACEHOLDER);
        assert_eq!(Commentary::Failed("boom".to_string()).text(), PLACEHOLDER);
    }

    #[test]
    fn test_build_prompt() {
        let items = products(2);
        let report = AnalysisReport::summarize(&items, "https://cool.myshopify.com");
        let prompt = build_prompt(&report, &items, 50);

        assert!(prompt.starts_with("Analyze this e-commerce store"));
        assert!(prompt.contains("- Item 0 | $1.00\n"));
        assert!(prompt.contains("- Item 1 | $2.00\n"));
        assert!(prompt.contains("platform: Shopify"));
        assert!(prompt.contains("average price 1.50"));
    }

    #[test]
    fn test_build_prompt_caps_products() {
        let items = products(5);
        let report = AnalysisReport::summarize(&items, "https://shop.example");
        let prompt = build_prompt(&report, &items, 2);

        assert!(prompt.contains("- Item 1 |"));
        assert!(!prompt.contains("- Item 2 |"));
        assert!(prompt.contains("(and 3 more)"));
    }

    #[tokio::test]
    async fn test_disabled_insights() {
        let result = DisabledInsights.generate("anything").await;
        assert!(matches!(result, Ok(None)));
    }
}
