//! Price statistics, rule-based advice, and the textual report.

pub mod report;
pub mod rules;
pub mod stats;

pub use report::AnalysisReport;
pub use stats::{parse_price, PriceStats};
