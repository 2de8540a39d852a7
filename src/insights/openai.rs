//! OpenAI-compatible chat completions client.

use super::InsightGenerator;
use crate::config::InsightsConfig;
use crate::error::InsightError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions client.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client for `config.base_url` authenticated with `api_key`.
    pub fn new(config: &InsightsConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build insight HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl InsightGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, InsightError> {
        info!("Requesting commentary from {}", self.model);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(InsightError::Network)?;

        let status = response.status();
        debug!("Insight response status: {}", status);

        if !status.is_success() {
            return Err(InsightError::Status { status: status.as_u16() });
        }

        let parsed: ChatResponse = response.json().await.map_err(InsightError::Decode)?;

        Ok(parsed.choices.into_iter().next().and_then(|c| c.message.content))
    }
}
