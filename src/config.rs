//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::store::SelectorStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
///
/// Every endpoint and credential the collaborators need lives here; nothing
/// below `main` reads the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Proxy URL for storefront fetches (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Total timeout for a storefront fetch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout for a storefront fetch, in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of products returned in a response (capped at 15)
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Output format for the CLI
    #[serde(default)]
    pub format: OutputFormat,

    /// AI commentary settings
    #[serde(default)]
    pub insights: InsightsConfig,

    /// Analysis history backend
    #[serde(default)]
    pub history: HistoryConfig,

    /// Extra selector strategies, tried before the built-in ones
    #[serde(default)]
    pub strategies: Vec<SelectorStrategy>,
}

/// Settings for the OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// API key; commentary is disabled when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL up to and including the API version
    #[serde(default = "default_insights_base_url")]
    pub base_url: String,

    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum products listed in the prompt
    #[serde(default = "default_prompt_products")]
    pub max_products: usize,

    /// Request timeout in seconds
    #[serde(default = "default_insights_timeout_secs")]
    pub timeout_secs: u64,
}

/// Settings for the history REST backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Base URL of the backend; history is disabled when absent
    #[serde(default)]
    pub base_url: Option<String>,

    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_sample_size() -> usize {
    15
}

fn default_insights_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_prompt_products() -> usize {
    50
}

fn default_insights_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sample_size: default_sample_size(),
            format: OutputFormat::Table,
            insights: InsightsConfig::default(),
            history: HistoryConfig::default(),
            strategies: Vec::new(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_insights_base_url(),
            model: default_model(),
            max_products: default_prompt_products(),
            timeout_secs: default_insights_timeout_secs(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("shop-analyzer").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(bind) = std::env::var("SHOP_ANALYZER_BIND") {
            self.bind = bind;
        }

        if let Ok(proxy) = std::env::var("SHOP_ANALYZER_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("SHOP_ANALYZER_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                self.insights.api_key = Some(key);
            }
        }

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            self.insights.base_url = base_url;
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.insights.model = model;
        }

        if let Ok(base_url) = std::env::var("HISTORY_BASE_URL") {
            self.history.base_url = Some(base_url);
        }

        if let Ok(key) = std::env::var("HISTORY_API_KEY") {
            self.history.api_key = Some(key);
        }

        self
    }
}

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
