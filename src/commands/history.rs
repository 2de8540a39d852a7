//! History command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::history::{AnalysisRecord, HistoryStore, HttpHistoryStore};
use crate::store::StoreTarget;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Lists stored analyses for a store.
pub struct HistoryCommand {
    config: Config,
}

impl HistoryCommand {
    /// Creates a new history command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Lists stored analyses and returns formatted output.
    ///
    /// Unlike the HTTP endpoint, a missing or failing backend is reported as an error.
    pub async fn execute(&self, store_url: &str, export_dir: Option<&Path>) -> Result<String> {
        let Some(base_url) = &self.config.history.base_url else {
            bail!("No history backend configured (set HISTORY_BASE_URL or [history] base_url)");
        };
        let store = HttpHistoryStore::new(base_url, &self.config.history)?;

        self.execute_with_store(&store, store_url, export_dir).await
    }

    /// Lists stored analyses with a provided store (for testing).
    pub async fn execute_with_store(
        &self,
        store: &impl HistoryStore,
        store_url: &str,
        export_dir: Option<&Path>,
    ) -> Result<String> {
        let store_url = StoreTarget::parse(store_url)?.url().to_string();
        info!("Loading history for: {}", store_url);

        let records = store.list(&store_url).await.context("Failed to load history")?;
        debug!("Loaded {} records", records.len());

        if let Some(dir) = export_dir {
            export(&records, dir)?;
        }

        Ok(Formatter::new(self.config.format).format_history(&records))
    }
}

/// Writes each record's text export into `dir`.
fn export(records: &[AnalysisRecord], dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    for record in records {
        let path = dir.join(record.export_file_name());
        std::fs::write(&path, record.export_text())
            .with_context(|| format!("Failed to write export: {}", path.display()))?;
        info!("Exported {}", path.display());
    }

    Ok(())
}
