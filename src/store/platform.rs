//! Best-effort storefront platform detection from the store URL.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known hosted storefront platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Shopify,
    Etsy,
    WooCommerce,
    BigCommerce,
    Squarespace,
    #[default]
    Unknown,
}

impl Platform {
    /// Guesses the platform from URL substrings. False negatives are expected.
    pub fn guess(url: &str) -> Self {
        let url = url.to_lowercase();

        if url.contains("myshopify.com") || url.contains("shopify") {
            Platform::Shopify
        } else if url.contains("etsy.com") {
            Platform::Etsy
        } else if url.contains("woocommerce") || url.contains("wp-content") {
            Platform::WooCommerce
        } else if url.contains("mybigcommerce.com") {
            Platform::BigCommerce
        } else if url.contains("squarespace.com") {
            Platform::Squarespace
        } else {
            Platform::Unknown
        }
    }

    /// Returns true unless the platform is [`Platform::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, Platform::Unknown)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Shopify => "Shopify",
            Platform::Etsy => "Etsy",
            Platform::WooCommerce => "WooCommerce",
            Platform::BigCommerce => "BigCommerce",
            Platform::Squarespace => "Squarespace",
            Platform::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
