//! Analyze command implementation.

use crate::config::Config;
use crate::error::AnalyzeError;
use crate::format::Formatter;
use crate::pipeline::{Analysis, Analyzer};
use anyhow::{Context, Result};
use tracing::info;

/// Analyzes one storefront and formats the report.
pub struct AnalyzeCommand {
    config: Config,
}

impl AnalyzeCommand {
    /// Creates a new analyze command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the analysis and returns formatted output.
    pub async fn execute(&self, store_url: &str) -> Result<String> {
        let analyzer = Analyzer::from_config(&self.config).context("Failed to set up analyzer")?;

        self.execute_with_analyzer(&analyzer, store_url).await
    }

    /// Executes the analysis with a provided analyzer (for testing).
    pub async fn execute_with_analyzer(&self, analyzer: &Analyzer, store_url: &str) -> Result<String> {
        info!("Analyzing: {}", store_url);

        let mut analysis = analyzer.analyze(store_url).await.map_err(|e| match e {
            AnalyzeError::Upstream(e) => {
                anyhow::Error::new(e).context("Store could not be fetched; try `analyze demo`")
            }
            other => anyhow::Error::new(other),
        })?;

        if let Analysis::Report(output) = &mut analysis {
            output.wait_for_history().await;
        }

        Ok(Formatter::new(self.config.format).format_analysis(&analysis))
    }
}
