//! JSON REST client for the history backend.

use super::{AnalysisRecord, HistoryStore};
use crate::config::HistoryConfig;
use crate::error::HistoryError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::{Client, RequestBuilder};

/// History store backed by `POST/GET {base_url}/analysis`.
pub struct HttpHistoryStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpHistoryStore {
    /// Creates a store rooted at `base_url`.
    pub fn new(base_url: &str, config: &HistoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build history HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }
}

#[async_trait]
impl HistoryStore for HttpHistoryStore {
    async fn save(&self, record: &AnalysisRecord) -> Result<(), HistoryError> {
        let url = format!("{}/analysis", self.base_url);
        debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .json(record)
            .send()
            .await
            .map_err(HistoryError::Network)?;

        if !response.status().is_success() {
            return Err(HistoryError::Status { status: response.status().as_u16() });
        }

        Ok(())
    }

    async fn list(&self, store_url: &str) -> Result<Vec<AnalysisRecord>, HistoryError> {
        let url =
            format!("{}/analysis?store_url={}", self.base_url, urlencoding::encode(store_url));
        debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(HistoryError::Network)?;

        if !response.status().is_success() {
            return Err(HistoryError::Status { status: response.status().as_u16() });
        }

        let mut records: Vec<AnalysisRecord> =
            response.json().await.map_err(HistoryError::Decode)?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }
}
