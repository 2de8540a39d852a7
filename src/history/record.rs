//! Flattened analysis row stored in the history backend.

use crate::analysis::stats::format_amount;
use crate::analysis::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// One stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub store_url: String,
    pub store_name: String,
    pub platform: String,
    pub product_count: usize,
    /// Formatted amount or "unavailable"
    pub avg_price: String,
    pub min_price: String,
    pub max_price: String,
    /// Full report text including AI commentary
    pub insights: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Flattens a report and its rendered text into a record.
    pub fn from_report(report: &AnalysisReport, rendered: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            store_url: report.store_url.clone(),
            store_name: store_name(&report.store_url),
            platform: report.platform.to_string(),
            product_count: report.product_count,
            avg_price: format_amount(report.price_stats.avg()),
            min_price: format_amount(report.price_stats.min()),
            max_price: format_amount(report.price_stats.max()),
            insights: rendered.to_string(),
            created_at,
        }
    }

    /// Plain-text export of the stored analysis.
    pub fn export_text(&self) -> String {
        format!(
            "SHOP ANALYSIS REPORT\n\
             ====================\n\
             \n\
             Store: {}\n\
             URL: {}\n\
             Platform: {}\n\
             Date: {}\n\
             \n\
             {}\n\
             \n\
             ---\n\
             Products Found: {}\n\
             Average Price: {}",
            self.store_name,
            self.store_url,
            self.platform,
            self.created_at.format("%Y-%m-%d"),
            self.insights.trim(),
            self.product_count,
            self.avg_price,
        )
    }

    /// File name for [`export_text`](Self::export_text).
    pub fn export_file_name(&self) -> String {
        let slug: String = self
            .store_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        format!("{}_analysis_{}.txt", slug, self.created_at.timestamp_millis())
    }
}

/// Human-friendly store name derived from the URL host.
pub fn store_name(store_url: &str) -> String {
    let Ok(url) = Url::parse(store_url) else {
        return store_url.to_string();
    };
    let Some(host) = url.host_str() else {
        return store_url.to_string();
    };

    let host = host.trim_start_matches("www.");
    host.split('.').next().filter(|label| !label.is_empty()).unwrap_or(host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProductRecord;
    use chrono::TimeZone;

    fn make_record() -> AnalysisRecord {
        let products = vec![
            ProductRecord::new("T-Shirt", "https://cool-shop.myshopify.com/products/t", Some("$29.99".into())),
            ProductRecord::new("Jacket", "https://cool-shop.myshopify.com/products/j", Some("$89.99".into())),
        ];
        let report = AnalysisReport::summarize(&products, "https://cool-shop.myshopify.com/collections/all");
        let created_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
        AnalysisRecord::from_report(&report, "STORE ANALYSIS\n...", created_at)
    }

    #[test]
    fn test_store_name() {
        assert_eq!(store_name("https://cool-shop.myshopify.com/collections/all"), "cool-shop");
        assert_eq!(store_name("https://www.etsy.com/shop/Maker"), "etsy");
        assert_eq!(store_name("http://127.0.0.1:8080/"), "127");
        assert_eq!(store_name("not a url"), "not a url");
    }

    #[test]
    fn test_from_report() {
        let record = make_record();
        assert_eq!(record.store_name, "cool-shop");
        assert_eq!(record.platform, "Shopify");
        assert_eq!(record.product_count, 2);
        assert_eq!(record.avg_price, "59.99");
        assert_eq!(record.min_price, "29.99");
        assert_eq!(record.max_price, "89.99");
    }

    #[test]
    fn test_export_text() {
        let text = make_record().export_text();
        assert!(text.starts_with("SHOP ANALYSIS REPORT\n===================="));
        assert!(text.contains("Store: cool-shop\n"));
        assert!(text.contains("Date: 2025-03-14\n"));
        assert!(text.contains("STORE ANALYSIS\n..."));
        assert!(text.ends_with("Products Found: 2\nAverage Price: 59.99"));
    }

    #[test]
    fn test_export_file_name() {
        let name = make_record().export_file_name();
        assert!(name.starts_with("cool-shop_analysis_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_serde_roundtrip_field_names() {
        let record = make_record();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["store_url"], "https://cool-shop.myshopify.com/collections/all");
        assert_eq!(json["product_count"], 2);
        assert_eq!(json["avg_price"], "59.99");

        let parsed: AnalysisRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
