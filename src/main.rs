//! shop-analyzer - Storefront product scraper with price statistics and AI commentary
//!
//! Runs the HTTP API for the browser front end, or a single analysis from the shell.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shop_analyzer::commands::{AnalyzeCommand, HistoryCommand, StrategiesCommand};
use shop_analyzer::config::{Config, OutputFormat};
use shop_analyzer::server;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shop-analyzer",
    version,
    about = "Storefront product scraper with price statistics and AI commentary",
    long_about = "Scrapes product listings from Shopify, Etsy, WooCommerce and similar storefronts, \
                  summarizes pricing, and asks a language model for advice."
)]
struct Cli {
    /// Proxy URL for storefront fetches (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SHOP_ANALYZER_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "SHOP_ANALYZER_BIND")]
        bind: Option<String>,
    },

    /// Analyze a storefront ("demo" for the built-in sample store)
    #[command(alias = "a")]
    Analyze {
        /// Store URL
        url: String,

        /// Maximum number of products to list (at most 15)
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Show stored analyses for a store
    History {
        /// Store URL
        url: String,

        /// Write each analysis as a text report into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// List selector strategies in the order they are tried
    Strategies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            server::serve(&config).await?;
        }

        Commands::Analyze { url, max } => {
            if let Some(max) = max {
                config.sample_size = max;
            }

            let cmd = AnalyzeCommand::new(config);
            let output = cmd.execute(&url).await?;
            println!("{}", output);
        }

        Commands::History { url, export } => {
            let cmd = HistoryCommand::new(config);
            let output = cmd.execute(&url, export.as_deref()).await?;
            println!("{}", output);
        }

        Commands::Strategies => {
            let cmd = StrategiesCommand::new(config);
            println!("{}", cmd.execute()?);
        }
    }

    Ok(())
}
