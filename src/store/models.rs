//! Data models for products extracted from storefront pages.

use serde::{Deserialize, Serialize};

/// One product listing found on a storefront page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Listing title, never empty
    pub title: String,
    /// Absolute product URL
    pub url: String,
    /// Price text as shown on the page (e.g. "$1,299.00")
    pub price: Option<String>,
}

impl ProductRecord {
    /// Creates a new record.
    pub fn new(title: impl Into<String>, url: impl Into<String>, price: Option<String>) -> Self {
        Self { title: title.into(), url: url.into(), price }
    }

    /// Returns the price as a positive number if the text can be read as one.
    pub fn price_value(&self) -> Option<f64> {
        self.price.as_deref().and_then(crate::analysis::stats::parse_price)
    }
}

/// Result of running the extractor over a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// At least one strategy matched.
    Found {
        /// Name of the strategy that produced the records
        strategy: String,
        products: Vec<ProductRecord>,
    },
    /// No strategy matched anything.
    Empty,
}

impl Extraction {
    /// Returns the extracted products (empty for [`Extraction::Empty`]).
    pub fn products(&self) -> &[ProductRecord] {
        match self {
            Extraction::Found { products, .. } => products,
            Extraction::Empty => &[],
        }
    }

    /// Returns true if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        matches!(self, Extraction::Empty)
    }
}
