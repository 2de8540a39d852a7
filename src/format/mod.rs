//! Output formatting for analyses and history (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::history::AnalysisRecord;
use crate::pipeline::{Analysis, AnalysisOutput, EMPTY_RESULT};
use crate::store::ProductRecord;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonAnalysis<'a> {
    result: &'a str,
    strategy: &'a str,
    report: &'a crate::analysis::AnalysisReport,
    products: &'a [ProductRecord],
    total_products: usize,
}

/// Formats CLI output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the outcome of an analysis.
    pub fn format_analysis(&self, analysis: &Analysis) -> String {
        match analysis {
            Analysis::Report(output) => match self.format {
                OutputFormat::Json => self.json_analysis(output),
                OutputFormat::Table => self.table_analysis(output),
                OutputFormat::Markdown => self.markdown_analysis(output),
                OutputFormat::Csv => self.csv_products(output.sample()),
            },
            Analysis::Empty { .. } => match self.format {
                OutputFormat::Json => {
                    serde_json::json!({ "result": EMPTY_RESULT }).to_string()
                }
                OutputFormat::Csv => Self::csv_product_header().to_string(),
                _ => EMPTY_RESULT.to_string(),
            },
        }
    }

    /// Formats stored analyses, newest first.
    pub fn format_history(&self, records: &[AnalysisRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_history_header().to_string(),
                _ => "No stored analyses.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_history(records),
            OutputFormat::Markdown => self.markdown_history(records),
            OutputFormat::Csv => self.csv_history(records),
        }
    }

    // JSON

    fn json_analysis(&self, output: &AnalysisOutput) -> String {
        let body = JsonAnalysis {
            result: &output.text,
            strategy: &output.strategy,
            report: &output.report,
            products: output.sample(),
            total_products: output.total(),
        };
        serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string())
    }

    // Table

    fn table_analysis(&self, output: &AnalysisOutput) -> String {
        let price_width = 12;
        let title_width = 50;
        let sample = output.sample();

        let mut lines = vec![output.text.clone(), String::new()];

        lines.push(format!("{:<price_width$}  {}", "Price", "Title"));
        lines.push(format!("{:-<price_width$}  {:-<title_width$}", "", ""));

        for product in sample {
            let price = product.price.as_deref().unwrap_or("N/A");
            lines.push(format!(
                "{:>price_width$}  {}",
                price,
                truncate(&product.title, title_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Showing {} of {} products", sample.len(), output.total()));

        lines.join("\n")
    }

    fn table_history(&self, records: &[AnalysisRecord]) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{:<16}  {:<12}  {:>8}  {:>10}  {}",
            "Date", "Platform", "Products", "Avg price", "Store"
        ));
        lines.push(format!("{:-<16}  {:-<12}  {:->8}  {:->10}  {:-<30}", "", "", "", "", ""));

        for record in records {
            lines.push(format!(
                "{:<16}  {:<12}  {:>8}  {:>10}  {}",
                record.created_at.format("%Y-%m-%d %H:%M"),
                record.platform,
                record.product_count,
                record.avg_price,
                record.store_url
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} analyses", records.len()));

        lines.join("\n")
    }

    // Markdown

    fn markdown_analysis(&self, output: &AnalysisOutput) -> String {
        let report = &output.report;
        let mut lines = Vec::new();

        lines.push(format!("## {}", report.store_url));
        lines.push(String::new());
        lines.push(format!("- **Platform:** {}", report.platform));
        lines.push(format!("- **Products:** {}", report.product_count));
        lines.push(format!("- **Prices:** {}", report.price_stats));
        lines.push(String::new());

        lines.push("### Insights".to_string());
        lines.push(String::new());
        lines.extend(report.insight_lines.iter().map(|l| format!("- {}", l)));
        lines.push(String::new());

        lines.push("### Recommendations".to_string());
        lines.push(String::new());
        lines.extend(report.recommendation_lines.iter().map(|l| format!("- {}", l)));
        lines.push(String::new());

        lines.push("### AI Commentary".to_string());
        lines.push(String::new());
        lines.push(output.commentary.text().trim().to_string());
        lines.push(String::new());

        lines.push("| Price | Title |".to_string());
        lines.push("|-------|-------|".to_string());
        for product in output.sample() {
            lines.push(format!(
                "| {} | [{}]({}) |",
                product.price.as_deref().unwrap_or("N/A"),
                truncate(&product.title, 40),
                product.url
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} of {} products shown*", output.sample().len(), output.total()));

        lines.join("\n")
    }

    fn markdown_history(&self, records: &[AnalysisRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| Date | Platform | Products | Avg price | Store |".to_string());
        lines.push("|------|----------|----------|-----------|-------|".to_string());

        for record in records {
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                record.created_at.format("%Y-%m-%d"),
                record.platform,
                record.product_count,
                record.avg_price,
                record.store_url
            ));
        }

        lines.join("\n")
    }

    // CSV

    fn csv_product_header() -> &'static str {
        "title,price,url"
    }

    fn csv_history_header() -> &'static str {
        "created_at,store_url,platform,product_count,avg_price,min_price,max_price"
    }

    fn csv_products(&self, products: &[ProductRecord]) -> String {
        let mut lines = vec![Self::csv_product_header().to_string()];

        for product in products {
            lines.push(format!(
                "{},{},{}",
                Self::csv_escape(&product.title),
                Self::csv_escape(product.price.as_deref().unwrap_or_default()),
                Self::csv_escape(&product.url)
            ));
        }

        lines.join("\n")
    }

    fn csv_history(&self, records: &[AnalysisRecord]) -> String {
        let mut lines = vec![Self::csv_history_header().to_string()];

        for record in records {
            lines.push(format!(
                "{},{},{},{},{},{},{}",
                record.created_at.to_rfc3339(),
                Self::csv_escape(&record.store_url),
                Self::csv_escape(&record.platform),
                record.product_count,
                record.avg_price,
                record.min_price,
                record.max_price
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `s` to at most `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::history::DisabledHistory;
    use crate::insights::DisabledInsights;
    use crate::pipeline::{Analyzer, PipelineSettings};
    use crate::store::{DocumentSource, Extractor};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    struct NoNetwork;

    #[async_trait]
    impl DocumentSource for NoNetwork {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::Status { status: 404, url: url.to_string() })
        }
    }

    async fn demo_analysis(sample_size: usize) -> Analysis {
        let analyzer = Analyzer::new(
            Arc::new(NoNetwork),
            Arc::new(DisabledInsights),
            Arc::new(DisabledHistory),
            Extractor::new(),
            PipelineSettings { sample_size, ..PipelineSettings::default() },
        );
        analyzer.analyze("demo").await.unwrap()
    }

    fn make_record() -> AnalysisRecord {
        AnalysisRecord {
            store_url: "https://cool-shop.myshopify.com/".to_string(),
            store_name: "cool-shop".to_string(),
            platform: "Shopify".to_string(),
            product_count: 12,
            avg_price: "42.50".to_string(),
            min_price: "10.00".to_string(),
            max_price: "99.00".to_string(),
            insights: "STORE ANALYSIS".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 3, 14, 5, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_table_analysis() {
        let analysis = demo_analysis(2).await;
        let output = Formatter::new(OutputFormat::Table).format_analysis(&analysis);

        assert!(output.starts_with("STORE ANALYSIS"));
        assert!(output.contains("Classic Cotton T-Shirt"));
        assert!(output.contains("$24.99"));
        assert!(!output.contains("Slim Fit Jeans"));
        assert!(output.contains("Showing 2 of 15 products"));
    }

    #[tokio::test]
    async fn test_json_analysis() {
        let analysis = demo_analysis(15).await;
        let output = Formatter::new(OutputFormat::Json).format_analysis(&analysis);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totalProducts"], 15);
        assert_eq!(value["strategy"], "shopify-grid");
        assert_eq!(value["report"]["platform"], "shopify");
        assert_eq!(value["products"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn test_markdown_analysis() {
        let analysis = demo_analysis(2).await;
        let output = Formatter::new(OutputFormat::Markdown).format_analysis(&analysis);

        assert!(output.starts_with("## https://demo-store.myshopify.com/collections/all"));
        assert!(output.contains("- **Platform:** Shopify"));
        assert!(output.contains("### Recommendations"));
        assert!(output.contains("| $24.99 | [Classic Cotton T-Shirt]"));
        assert!(output.contains("*2 of 15 products shown*"));
    }

    #[tokio::test]
    async fn test_csv_analysis() {
        let analysis = demo_analysis(15).await;
        let output = Formatter::new(OutputFormat::Csv).format_analysis(&analysis);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "title,price,url");
        assert!(lines[15].starts_with("Gift Card,,https://"));
    }

    #[test]
    fn test_empty_analysis() {
        let empty = Analysis::Empty { store_url: "https://shop.example/".to_string() };

        assert_eq!(Formatter::new(OutputFormat::Table).format_analysis(&empty), EMPTY_RESULT);
        assert_eq!(Formatter::new(OutputFormat::Csv).format_analysis(&empty), "title,price,url");

        let json = Formatter::new(OutputFormat::Json).format_analysis(&empty);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"], EMPTY_RESULT);
    }

    #[test]
    fn test_history_formats() {
        let records = vec![make_record()];

        let table = Formatter::new(OutputFormat::Table).format_history(&records);
        assert!(table.contains("2025-02-03 14:05"));
        assert!(table.contains("42.50"));
        assert!(table.contains("Total: 1 analyses"));

        let md = Formatter::new(OutputFormat::Markdown).format_history(&records);
        assert!(md.contains("| 2025-02-03 | Shopify | 12 | 42.50 | https://cool-shop.myshopify.com/ |"));

        let csv = Formatter::new(OutputFormat::Csv).format_history(&records);
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.lines().nth(1).unwrap().contains(",Shopify,12,42.50,10.00,99.00"));

        let json = Formatter::new(OutputFormat::Json).format_history(&records);
        assert!(json.contains("\"store_name\": \"cool-shop\""));
    }

    #[test]
    fn test_history_empty() {
        assert_eq!(Formatter::new(OutputFormat::Json).format_history(&[]), "[]");
        assert_eq!(Formatter::new(OutputFormat::Table).format_history(&[]), "No stored analyses.");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("simple"), "simple");
        assert_eq!(Formatter::csv_escape("Socks, 3-pack"), "\"Socks, 3-pack\"");
        assert_eq!(Formatter::csv_escape("12\" vinyl"), "\"12\"\" vinyl\"");
    }

    #[test]
    fn test_csv_quotes_urls_with_commas() {
        let products = vec![ProductRecord::new(
            "Wool Hat",
            "https://shop.example/products/hat?colors=red,blue",
            Some("$25.00".into()),
        )];
        let csv = Formatter::new(OutputFormat::Csv).csv_products(&products);
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "Wool Hat,$25.00,\"https://shop.example/products/hat?colors=red,blue\""
        );

        let mut record = make_record();
        record.store_url = "https://shop.example/?ref=a,b".to_string();
        let csv = Formatter::new(OutputFormat::Csv).format_history(&[record]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(",\"https://shop.example/?ref=a,b\",Shopify,"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
