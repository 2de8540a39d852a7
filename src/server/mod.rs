//! HTTP API consumed by the browser front end.

pub mod handlers;
pub mod responder;

use crate::config::Config;
use crate::pipeline::Analyzer;
use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

/// Builds the API router.
pub fn router(analyzer: Arc<Analyzer>) -> Router {
    Router::new()
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/history", get(handlers::history))
        .route("/health", get(handlers::health))
        .with_state(AppState { analyzer })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

/// Serves the API on `config.bind` until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let analyzer = Arc::new(Analyzer::from_config(config)?);

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(analyzer)).await.context("Server error")
}
