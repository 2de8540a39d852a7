//! Route handlers.

use super::responder;
use super::AppState;
use crate::error::ValidationError;
use crate::history::AnalysisRecord;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub store_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub store_url: Option<String>,
}

/// `POST /api/analyze`
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let store_url = match payload {
        Ok(Json(AnalyzeRequest { store_url: Some(url) })) => url,
        Ok(_) => return responder::invalid(&ValidationError::Missing),
        Err(rejection) => {
            debug!("Rejected analyze body: {}", rejection);
            return responder::invalid(&ValidationError::InvalidBody {
                reason: rejection.body_text(),
            });
        }
    };

    info!("Analyze request for {}", store_url);
    responder::respond(state.analyzer.analyze(&store_url).await)
}

/// `GET /api/history?storeUrl=`
///
/// The store reference is normalized like an analyze request, so a bare host
/// finds records saved under its `https://` URL.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<AnalysisRecord>> {
    match query.store_url.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => Json(state.analyzer.history(url).await),
        None => Json(Vec::new()),
    }
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
