//! CSS selector strategies for locating products on storefront pages.
//!
//! Each strategy describes one markup convention. Strategies are tried in
//! order and the first one that yields a product wins.
//!
//! **Update process**: When a theme is not recognized, capture an HTML sample,
//! add or adjust a strategy here, and add a fixture test.

use crate::error::StrategyError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// One heuristic for finding products in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorStrategy {
    /// Short identifier used in logs
    pub name: String,
    /// Element wrapping a single product listing
    pub container: String,
    /// Title element inside the container
    pub title: String,
    /// Link element inside the container (its `href` is used)
    pub link: String,
    /// Price element inside the container
    pub price: String,
}

impl SelectorStrategy {
    /// Creates a strategy from selector strings.
    pub fn new(
        name: impl Into<String>,
        container: impl Into<String>,
        title: impl Into<String>,
        link: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            container: container.into(),
            title: title.into(),
            link: link.into(),
            price: price.into(),
        }
    }

    /// Parses every selector, failing on the first that does not compile.
    ///
    /// The container is kept as one selector list so containers come back in
    /// document order. Title, link and price are split into their comma
    /// separated alternatives, which are tried in the order written.
    pub fn compile(&self) -> Result<CompiledStrategy, StrategyError> {
        Ok(CompiledStrategy {
            name: self.name.clone(),
            container: self.parse_field("container", &self.container)?,
            title: self.parse_alternatives("title", &self.title)?,
            link: self.parse_alternatives("link", &self.link)?,
            price: self.parse_alternatives("price", &self.price)?,
        })
    }

    fn parse_field(&self, field: &'static str, selector: &str) -> Result<Selector, StrategyError> {
        Selector::parse(selector).map_err(|e| StrategyError {
            strategy: self.name.clone(),
            field,
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }

    fn parse_alternatives(
        &self,
        field: &'static str,
        selector: &str,
    ) -> Result<Vec<Selector>, StrategyError> {
        let parts = split_selector_list(selector);
        if parts.is_empty() {
            // Let the parser report the empty selector
            return self.parse_field(field, selector).map(|s| vec![s]);
        }
        parts.into_iter().map(|part| self.parse_field(field, part)).collect()
    }
}

/// Splits a selector list on its top-level commas.
///
/// Commas inside parentheses, attribute brackets or quotes belong to the
/// enclosing selector (`:is(h2, h3)`, `[data-x='a,b']`).
fn split_selector_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

/// A strategy with its selectors parsed and ready to match.
#[derive(Debug, Clone)]
pub struct CompiledStrategy {
    pub name: String,
    pub container: Selector,
    /// Alternatives in priority order
    pub title: Vec<Selector>,
    pub link: Vec<Selector>,
    pub price: Vec<Selector>,
}

/// Built-in strategies in priority order.
pub fn builtin() -> Vec<SelectorStrategy> {
    vec![
        // Classic Shopify themes (Debut, Brooklyn, Minimal, ...)
        SelectorStrategy::new(
            "shopify-grid",
            ".grid-product, .product-card, .grid__item .grid-view-item",
            ".grid-product__title, .product-card__title, .grid-view-item__title",
            "a.grid-product__link, a.product-card__link, a[href]",
            ".grid-product__price, .product-card__price, .price, .money",
        ),
        // Shopify Online Store 2.0 (Dawn and derivatives)
        SelectorStrategy::new(
            "shopify-dawn",
            ".card-wrapper",
            ".card__heading, .card-information__text",
            "a.full-unstyled-link, a[href]",
            ".price-item--sale, .price-item--regular, .price-item, .price",
        ),
        SelectorStrategy::new(
            "etsy-listing",
            "li.wt-list-unstyled, .v2-listing-card",
            "h3, .v2-listing-card__title",
            "a.listing-link, a[href]",
            ".currency-value, .lc-price",
        ),
        SelectorStrategy::new(
            "woocommerce-loop",
            "li.product, .wc-block-grid__product",
            ".woocommerce-loop-product__title, .wc-block-grid__product-title",
            "a.woocommerce-LoopProduct-link, a[href]",
            ".price .amount, .price",
        ),
        // Last resort for hand-rolled markup
        SelectorStrategy::new(
            "generic-item",
            ".product-item, .product-tile, .product",
            ".product-item__title, .product-title, .product-name, h2, h3",
            "a[href]",
            ".product-price, .price, .money, [itemprop='price']",
        ),
    ]
}

/// Compiled built-in strategies.
pub static BUILTIN: LazyLock<Vec<CompiledStrategy>> = LazyLock::new(|| {
    builtin()
        .iter()
        .map(|strategy| strategy.compile().unwrap())
        .collect()
});
