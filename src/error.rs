//! Error taxonomy for the analysis pipeline and its collaborators.
//!
//! Only [`ValidationError`] and [`FetchError`] ever reach the caller as a
//! failure. Insight and history errors are logged and degraded by the pipeline.

use thiserror::Error;

/// The inbound store reference could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no store URL was provided")]
    Missing,

    #[error("'{input}' is not a valid URL")]
    Malformed { input: String },

    #[error("unsupported URL scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    #[error("request body could not be read: {reason}")]
    InvalidBody { reason: String },
}

/// Retrieving the storefront document failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("store responded with status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} could not be completed")]
    Network {
        url: String,
        #[source]
        source: wreq::Error,
    },
}

impl FetchError {
    /// HTTP status returned by the store, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Network { .. } => None,
        }
    }
}

/// Failure of an analysis request as seen by the boundary.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] FetchError),
}

/// The text-completion collaborator failed.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("insight service responded with status {status}")]
    Status { status: u16 },

    #[error("insight service request failed")]
    Network(#[source] wreq::Error),

    #[error("insight service returned an unreadable body")]
    Decode(#[source] wreq::Error),
}

/// The history backend failed.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store responded with status {status}")]
    Status { status: u16 },

    #[error("history store request failed")]
    Network(#[source] wreq::Error),

    #[error("history store returned an unreadable body")]
    Decode(#[source] wreq::Error),
}

/// A selector strategy contains a selector that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("strategy '{strategy}' has an invalid {field} selector '{selector}': {reason}")]
pub struct StrategyError {
    pub strategy: String,
    pub field: &'static str,
    pub selector: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_status() {
        let err = FetchError::Status { status: 403, url: "https://shop.example".to_string() };
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_analyze_error_from_validation() {
        let err: AnalyzeError = ValidationError::Missing.into();
        assert!(matches!(err, AnalyzeError::Validation(ValidationError::Missing)));
        assert_eq!(err.to_string(), "no store URL was provided");
    }

    #[test]
    fn test_strategy_error_display() {
        let err = StrategyError {
            strategy: "custom".to_string(),
            field: "title",
            selector: "h3[".to_string(),
            reason: "unexpected end".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("custom"));
        assert!(msg.contains("title"));
        assert!(msg.contains("h3["));
    }
}
