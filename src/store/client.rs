//! HTTP client for storefront pages using wreq for browser emulation.

use crate::config::Config;
use crate::error::FetchError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching storefront documents - enables mocking for tests.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetches the document at `url` and returns its body.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Storefront HTTP client that presents itself as a desktop browser.
pub struct StoreClient {
    client: Client,
}

impl StoreClient {
    /// Creates a new client with the timeouts and proxy from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build storefront HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for StoreClient {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching storefront: {}", url);

        let network = |source| FetchError::Network { url: url.to_string(), source };

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cache-Control", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            if status.as_u16() == 403 || status.as_u16() == 429 {
                warn!("Store {} refused the request ({}); it may block scrapers", url, status);
            }
            return Err(FetchError::Status { status: status.as_u16(), url: url.to_string() });
        }

        response.text().await.map_err(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client() -> StoreClient {
        let config = Config { timeout_secs: 5, connect_timeout_secs: 2, ..Config::default() };
        StoreClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        let html = r#"<html><body><div class="product-card">Tee</div></body></html>"#;

        Mock::given(method("GET"))
            .and(path("/collections/all"))
            .and(header_exists("accept-language"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let url = format!("{}/collections/all", mock_server.uri());
        let body = tokio_test::assert_ok!(client.fetch(&url).await);
        assert!(body.contains("product-card"));
    }

    #[tokio::test]
    async fn test_fetch_forbidden() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let err = client.fetch(&mock_server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 403, .. }));
        assert_eq!(err.status(), Some(403));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let err = client.fetch(&mock_server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_network_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP connections
        let client = make_client();
        let err = client.fetch("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let client = make_client();
        let body = client.fetch(&mock_server.uri()).await.unwrap();
        assert!(body.is_empty());
    }
}
