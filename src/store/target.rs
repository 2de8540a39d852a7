//! Validation of the inbound store reference.

use crate::error::ValidationError;
use crate::store::demo;
use url::Url;

/// Where the storefront document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// A real store, fetched over HTTP(S).
    Live(Url),
    /// The built-in demo storefront; never touches the network.
    Demo,
}

impl StoreTarget {
    /// Parses user input into a target.
    ///
    /// Inputs containing the demo token select the demo store. Bare hosts such
    /// as `shop.example.com` are treated as `https://`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::Missing);
        }

        if demo::is_demo_input(input) {
            return Ok(StoreTarget::Demo);
        }

        let candidate =
            if input.contains("://") { input.to_string() } else { format!("https://{}", input) };

        let url = Url::parse(&candidate)
            .map_err(|_| ValidationError::Malformed { input: input.to_string() })?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => return Err(ValidationError::UnsupportedScheme { scheme: scheme.to_string() }),
        }

        if url.host_str().is_none_or(str::is_empty) {
            return Err(ValidationError::Malformed { input: input.to_string() });
        }

        Ok(StoreTarget::Live(url))
    }

    /// URL used for link resolution, platform detection and history.
    pub fn url(&self) -> Url {
        match self {
            StoreTarget::Live(url) => url.clone(),
            StoreTarget::Demo => demo::base_url(),
        }
    }
}
