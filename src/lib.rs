//! shop-analyzer - Storefront product scraper with price statistics and AI commentary
//!
//! Fetches a store page with browser emulation, extracts product listings
//! with ordered selector heuristics, and summarizes pricing into a report.

pub mod analysis;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod history;
pub mod insights;
pub mod pipeline;
pub mod server;
pub mod store;

pub use analysis::{AnalysisReport, PriceStats};
pub use config::Config;
pub use error::{AnalyzeError, FetchError, ValidationError};
pub use pipeline::{Analysis, AnalysisOutput, Analyzer};
pub use store::{Extraction, Extractor, Platform, ProductRecord};
