//! Request-scoped analysis pipeline: fetch, extract, summarize, comment, record.

use crate::analysis::AnalysisReport;
use crate::config::Config;
use crate::error::AnalyzeError;
use crate::history::{AnalysisRecord, DisabledHistory, HistoryStore, HttpHistoryStore};
use crate::insights::{self, Commentary, DisabledInsights, InsightGenerator, OpenAiClient};
use crate::store::demo::DEMO_DOCUMENT;
use crate::store::{DocumentSource, Extraction, Extractor, ProductRecord, StoreClient, StoreTarget};
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Result text when no strategy found any products.
pub const EMPTY_RESULT: &str = "No products found. The store may block scraping, load its catalog \
     with JavaScript, or use a layout that is not recognized yet.";

/// Upper bound on the products included in a response.
pub const MAX_SAMPLE_SIZE: usize = 15;

/// Tunables for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Products included in a response
    pub sample_size: usize,
    /// Products listed in the commentary prompt
    pub prompt_products: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self { sample_size: MAX_SAMPLE_SIZE, prompt_products: 50 }
    }
}

impl PipelineSettings {
    /// Reads the tunables from `config`, capping the sample at [`MAX_SAMPLE_SIZE`].
    pub fn from_config(config: &Config) -> Self {
        if config.sample_size > MAX_SAMPLE_SIZE {
            debug!("Sample size {} capped at {}", config.sample_size, MAX_SAMPLE_SIZE);
        }
        Self {
            sample_size: config.sample_size.min(MAX_SAMPLE_SIZE),
            prompt_products: config.insights.max_products,
        }
    }
}

/// A finished analysis with at least one product.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    pub commentary: Commentary,
    /// Every extracted product, in document order
    pub products: Vec<ProductRecord>,
    /// Rendered report text including commentary
    pub text: String,
    /// Selector strategy that matched
    pub strategy: String,
    sample_size: usize,
    history_task: Option<JoinHandle<()>>,
}

impl AnalysisOutput {
    /// The first `sample_size` products.
    pub fn sample(&self) -> &[ProductRecord] {
        &self.products[..self.products.len().min(self.sample_size)]
    }

    pub fn total(&self) -> usize {
        self.products.len()
    }

    /// Waits for the background history write, if one was started.
    ///
    /// Short-lived callers such as the CLI use this so the process does not
    /// exit before the record is sent.
    pub async fn wait_for_history(&mut self) {
        if let Some(task) = self.history_task.take() {
            if let Err(e) = task.await {
                warn!("History task did not complete: {}", e);
            }
        }
    }
}

/// Outcome of a successful analysis request.
#[derive(Debug)]
pub enum Analysis {
    Report(AnalysisOutput),
    /// Every strategy came up empty. Not an error.
    Empty { store_url: String },
}

/// Runs the analysis pipeline against injected collaborators.
pub struct Analyzer {
    source: Arc<dyn DocumentSource>,
    insights: Arc<dyn InsightGenerator>,
    history: Arc<dyn HistoryStore>,
    extractor: Extractor,
    settings: PipelineSettings,
}

impl Analyzer {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        insights: Arc<dyn InsightGenerator>,
        history: Arc<dyn HistoryStore>,
        extractor: Extractor,
        settings: PipelineSettings,
    ) -> Self {
        Self { source, insights, history, extractor, settings }
    }

    /// Builds the live collaborators described by `config`.
    ///
    /// Commentary and history are disabled when their endpoints are not
    /// configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source: Arc<dyn DocumentSource> =
            Arc::new(StoreClient::new(config).context("Failed to create storefront client")?);

        let insights: Arc<dyn InsightGenerator> = match &config.insights.api_key {
            Some(key) => Arc::new(OpenAiClient::new(&config.insights, key.clone())?),
            None => {
                debug!("No insight API key configured, commentary disabled");
                Arc::new(DisabledInsights)
            }
        };

        let history: Arc<dyn HistoryStore> = match &config.history.base_url {
            Some(base_url) => Arc::new(HttpHistoryStore::new(base_url, &config.history)?),
            None => {
                debug!("No history backend configured");
                Arc::new(DisabledHistory)
            }
        };

        let extractor = Extractor::with_custom(&config.strategies)
            .context("Invalid selector strategy in config")?;

        Ok(Self::new(source, insights, history, extractor, PipelineSettings::from_config(config)))
    }

    /// Analyzes the store referenced by `input`.
    pub async fn analyze(&self, input: &str) -> Result<Analysis, AnalyzeError> {
        let target = StoreTarget::parse(input)?;
        let base = target.url();
        let store_url = base.to_string();

        let html = match &target {
            StoreTarget::Demo => {
                info!("Using demo storefront");
                DEMO_DOCUMENT.to_string()
            }
            StoreTarget::Live(url) => {
                info!("Fetching {}", url);
                self.source.fetch(url.as_str()).await?
            }
        };

        let (strategy, products) = match self.extractor.extract(&html, &base) {
            Extraction::Found { strategy, products } => (strategy, products),
            Extraction::Empty => {
                info!("No products found on {}", store_url);
                return Ok(Analysis::Empty { store_url });
            }
        };
        info!("Extracted {} products with '{}'", products.len(), strategy);

        let report = AnalysisReport::summarize(&products, &store_url);

        let prompt = insights::build_prompt(&report, &products, self.settings.prompt_products);
        let commentary = Commentary::from_result(self.insights.generate(&prompt).await);
        if let Commentary::Failed(reason) = &commentary {
            warn!("Commentary unavailable: {}", reason);
        }

        let text = report.render(commentary.text());
        let record = AnalysisRecord::from_report(&report, &text, Utc::now());
        let history_task = Some(self.spawn_history_save(record));

        Ok(Analysis::Report(AnalysisOutput {
            report,
            commentary,
            products,
            text,
            strategy,
            sample_size: self.settings.sample_size,
            history_task,
        }))
    }

    /// Lists stored analyses for the store referenced by `input`.
    ///
    /// The input is normalized the same way [`Analyzer::analyze`] normalizes it
    /// before saving, so `cool-shop.myshopify.com` finds records stored under
    /// `https://cool-shop.myshopify.com/`. Unusable input and backend failures
    /// yield an empty list.
    pub async fn history(&self, input: &str) -> Vec<AnalysisRecord> {
        let store_url = match StoreTarget::parse(input) {
            Ok(target) => target.url().to_string(),
            Err(e) => {
                debug!("Ignoring history lookup for '{}': {}", input, e);
                return Vec::new();
            }
        };

        match self.history.list(&store_url).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to load history for {}: {}", store_url, e);
                Vec::new()
            }
        }
    }

    fn spawn_history_save(&self, record: AnalysisRecord) -> JoinHandle<()> {
        let history = Arc::clone(&self.history);
        tokio::spawn(async move {
            match history.save(&record).await {
                Ok(()) => debug!("Saved analysis of {}", record.store_url),
                Err(e) => warn!("Failed to save analysis of {}: {}", record.store_url, e),
            }
        })
    }
}
