//! Product extraction from storefront HTML.

use crate::error::StrategyError;
use crate::store::models::{Extraction, ProductRecord};
use crate::store::selectors::{CompiledStrategy, SelectorStrategy, BUILTIN};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};
use url::Url;

/// Extracts products from storefront pages using ordered selector strategies.
#[derive(Debug, Clone)]
pub struct Extractor {
    strategies: Vec<CompiledStrategy>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self { strategies: BUILTIN.clone() }
    }
}

impl Extractor {
    /// Creates an extractor using only the built-in strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor that tries `custom` strategies before the built-ins.
    pub fn with_custom(custom: &[SelectorStrategy]) -> Result<Self, StrategyError> {
        let mut strategies = custom
            .iter()
            .map(SelectorStrategy::compile)
            .collect::<Result<Vec<_>, _>>()?;
        strategies.extend(BUILTIN.iter().cloned());
        Ok(Self { strategies })
    }

    /// Returns the strategy names in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name.as_str()).collect()
    }

    /// Parses `html` and extracts products, resolving links against `base`.
    pub fn extract(&self, html: &str, base: &Url) -> Extraction {
        let document = Html::parse_document(html);
        self.extract_document(&document, base)
    }

    /// Extracts products from an already parsed document.
    pub fn extract_document(&self, document: &Html, base: &Url) -> Extraction {
        let origin = origin_of(base);

        for strategy in &self.strategies {
            let products: Vec<ProductRecord> = document
                .select(&strategy.container)
                .filter_map(|container| parse_container(strategy, container, &origin))
                .collect();

            if products.is_empty() {
                trace!("Strategy {} matched nothing", strategy.name);
                continue;
            }

            debug!("Strategy {} extracted {} products", strategy.name, products.len());
            return Extraction::Found { strategy: strategy.name.clone(), products };
        }

        debug!("No strategy matched any products");
        Extraction::Empty
    }
}

/// Builds a record from one container, or `None` if title or link is missing.
fn parse_container(
    strategy: &CompiledStrategy,
    container: ElementRef,
    origin: &Url,
) -> Option<ProductRecord> {
    let title = first_match(container, &strategy.title).map(element_text)?;
    if title.is_empty() {
        return None;
    }

    let href = first_match(container, &strategy.link)
        .and_then(|e| e.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())?;

    let url = resolve_link(origin, href)?;

    let price = first_match(container, &strategy.price)
        .map(element_text)
        .filter(|price| !price.is_empty());

    Some(ProductRecord { title, url, price })
}

/// First element matched by the earliest alternative that matches anything.
fn first_match<'a>(container: ElementRef<'a>, alternatives: &[Selector]) -> Option<ElementRef<'a>> {
    alternatives.iter().find_map(|selector| container.select(selector).next())
}

/// Collects an element's text with whitespace runs collapsed.
fn element_text(element: ElementRef) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Returns the origin (scheme, host, port) of `url` as a URL with path "/".
fn origin_of(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}

/// Rewrites `href` to an absolute URL against the store origin.
pub fn resolve_link(origin: &Url, href: &str) -> Option<String> {
    match origin.join(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url.to_string()),
        Ok(url) => {
            trace!("Skipping non-http link: {}", url);
            None
        }
        Err(e) => {
            trace!("Could not resolve link {}: {}", href, e);
            None
        }
    }
}
