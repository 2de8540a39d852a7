//! Lists the selector strategies in the order they are tried.

use crate::config::{Config, OutputFormat};
use crate::store::selectors::builtin;
use crate::store::{Extractor, SelectorStrategy};
use anyhow::{Context, Result};

/// Describes the active selector strategies.
pub struct StrategiesCommand {
    config: Config,
}

impl StrategiesCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Validates custom strategies and returns the formatted list.
    pub fn execute(&self) -> Result<String> {
        // Compiling the extractor surfaces invalid custom selectors
        Extractor::with_custom(&self.config.strategies)
            .context("Invalid selector strategy in config")?;

        let strategies: Vec<SelectorStrategy> =
            self.config.strategies.iter().cloned().chain(builtin()).collect();

        Ok(match self.config.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&strategies).unwrap_or_else(|_| "[]".to_string())
            }
            _ => {
                let mut lines = Vec::new();
                for (i, strategy) in strategies.iter().enumerate() {
                    let origin =
                        if i < self.config.strategies.len() { " (custom)" } else { "" };
                    lines.push(format!("{}. {}{}", i + 1, strategy.name, origin));
                    lines.push(format!("   container: {}", strategy.container));
                    lines.push(format!("   title:     {}", strategy.title));
                    lines.push(format!("   link:      {}", strategy.link));
                    lines.push(format!("   price:     {}", strategy.price));
                }
                lines.join("\n")
            }
        })
    }
}
