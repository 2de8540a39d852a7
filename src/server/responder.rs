//! Maps pipeline outcomes to HTTP responses.
//!
//! This is the only place that turns error kinds into user-facing text.

use crate::error::{AnalyzeError, FetchError, ValidationError};
use crate::pipeline::{Analysis, EMPTY_RESULT};
use crate::store::ProductRecord;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Hint attached to upstream failures.
pub const DEMO_SUGGESTION: &str =
    "Enter \"demo\" as the store URL to see a sample analysis without contacting a store.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportBody<'a> {
    result: &'a str,
    products: &'a [ProductRecord],
    total_products: usize,
}

#[derive(Debug, Serialize)]
struct EmptyBody {
    result: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'static str>,
}

/// Builds the response for one analysis request.
pub fn respond(outcome: Result<Analysis, AnalyzeError>) -> Response {
    match outcome {
        Ok(Analysis::Report(output)) => (
            StatusCode::OK,
            Json(ReportBody {
                result: &output.text,
                products: output.sample(),
                total_products: output.total(),
            }),
        )
            .into_response(),
        Ok(Analysis::Empty { .. }) => {
            (StatusCode::OK, Json(EmptyBody { result: EMPTY_RESULT })).into_response()
        }
        Err(AnalyzeError::Validation(e)) => invalid(&e),
        Err(AnalyzeError::Upstream(e)) => upstream(&e),
    }
}

/// 400 with a message describing what was wrong with the input.
pub fn invalid(error: &ValidationError) -> Response {
    let message = match error {
        ValidationError::Missing => "Please provide a store URL.".to_string(),
        ValidationError::Malformed { input } => format!("'{}' is not a valid store URL.", input),
        ValidationError::UnsupportedScheme { scheme } => {
            format!("Only http and https store URLs are supported (got '{}').", scheme)
        }
        ValidationError::InvalidBody { .. } => {
            "The request body must be JSON such as {\"storeUrl\": \"https://shop.example\"}."
                .to_string()
        }
    };

    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message, suggestion: None })).into_response()
}

/// 502 with a suggestion to try the demo store.
pub fn upstream(error: &FetchError) -> Response {
    let message = match error.status() {
        Some(403) | Some(429) => "The store blocked our request.".to_string(),
        Some(status) => format!("The store responded with HTTP {}.", status),
        None => "The store could not be reached.".to_string(),
    };

    (StatusCode::BAD_GATEWAY, Json(ErrorBody { error: message, suggestion: Some(DEMO_SUGGESTION) }))
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_empty_outcome_is_success() {
        let response =
            respond(Ok(Analysis::Empty { store_url: "https://shop.example/".to_string() }));
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["result"], EMPTY_RESULT);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_validation_is_bad_request() {
        let response = respond(Err(AnalyzeError::Validation(ValidationError::Missing)));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Please provide a store URL.");
        assert!(body.get("suggestion").is_none());
    }

    #[tokio::test]
    async fn test_invalid_body_message() {
        let err = ValidationError::InvalidBody { reason: "expected value".to_string() };
        let response = invalid(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("The request body must be JSON"));
    }

    #[tokio::test]
    async fn test_upstream_suggests_demo() {
        let err = FetchError::Status { status: 403, url: "https://blocked.example".to_string() };
        let response = respond(Err(AnalyzeError::Upstream(err)));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["error"], "The store blocked our request.");
        assert!(body["suggestion"].as_str().unwrap().contains("demo"));
    }

    #[tokio::test]
    async fn test_upstream_other_status() {
        let err = FetchError::Status { status: 500, url: "https://down.example".to_string() };
        let body = body_json(upstream(&err)).await;
        assert_eq!(body["error"], "The store responded with HTTP 500.");
    }
}
