//! Analysis history kept in an external REST backend.
//!
//! History is best effort. Nothing here is allowed to fail an analysis.

pub mod client;
pub mod record;

use crate::error::HistoryError;
use async_trait::async_trait;

pub use client::HttpHistoryStore;
pub use record::AnalysisRecord;

/// Trait for history backends - enables mocking for tests.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persists one analysis.
    async fn save(&self, record: &AnalysisRecord) -> Result<(), HistoryError>;

    /// Lists stored analyses for a store, newest first.
    async fn list(&self, store_url: &str) -> Result<Vec<AnalysisRecord>, HistoryError>;
}

/// Store used when no backend is configured.
pub struct DisabledHistory;

#[async_trait]
impl HistoryStore for DisabledHistory {
    async fn save(&self, _record: &AnalysisRecord) -> Result<(), HistoryError> {
        Ok(())
    }

    async fn list(&self, _store_url: &str) -> Result<Vec<AnalysisRecord>, HistoryError> {
        Ok(Vec::new())
    }
}
