//! Integration tests for product extraction using fixture files.

use shop_analyzer::analysis::AnalysisReport;
use shop_analyzer::store::{Extraction, Extractor, Platform, SelectorStrategy};
use url::Url;

const DAWN_FIXTURE: &str = include_str!("fixtures/dawn_collection.html");
const ETSY_FIXTURE: &str = include_str!("fixtures/etsy_shop.html");

#[test]
fn test_extract_dawn_collection() {
    let base = Url::parse("https://northwind.example/collections/all?page=2").unwrap();
    let extraction = Extractor::new().extract(DAWN_FIXTURE, &base);

    let Extraction::Found { strategy, products } = extraction else {
        panic!("expected products");
    };
    assert_eq!(strategy, "shopify-dawn");

    // The fourth card has an empty heading and is skipped
    assert_eq!(products.len(), 3);

    let backpack = &products[0];
    assert_eq!(backpack.title, "Trail Runner Backpack");
    assert_eq!(
        backpack.url,
        "https://northwind.example/products/trail-runner-backpack?variant=4012"
    );
    assert_eq!(backpack.price.as_deref(), Some("$1,299.00 USD"));
    assert_eq!(backpack.price_value(), Some(1299.0));

    // Sale price wins even though the regular price block comes first
    assert_eq!(products[1].url, "https://cdn.northwind.example/products/merino-socks");
    assert_eq!(products[1].price.as_deref(), Some("$18.00"));

    // Protocol-relative link takes the store's scheme
    assert_eq!(products[2].url, "https://northwind.example/products/camp-mug");
    assert_eq!(products[2].price_value(), None);
}

#[test]
fn test_dawn_report() {
    let base = Url::parse("https://northwind.myshopify.com/collections/all").unwrap();
    let extraction = Extractor::new().extract(DAWN_FIXTURE, &base);
    let report = AnalysisReport::summarize(extraction.products(), base.as_str());

    assert_eq!(report.product_count, 3);
    assert_eq!(report.platform, Platform::Shopify);
    assert_eq!(report.priced_count, 2);
    assert_eq!(report.price_stats.min(), Some(18.0));
    assert_eq!(report.price_stats.max(), Some(1299.0));
    assert_eq!(report.price_stats.avg(), Some(658.5));
    assert!(report.insight_lines.iter().any(|l| l.contains("1 of 3 products")));
}

#[test]
fn test_extract_etsy_shop() {
    let base = Url::parse("https://www.etsy.com/shop/ClayAndKiln").unwrap();
    let extraction = Extractor::new().extract(ETSY_FIXTURE, &base);

    let Extraction::Found { strategy, products } = extraction else {
        panic!("expected products");
    };
    assert_eq!(strategy, "etsy-listing");
    assert_eq!(products.len(), 3);
    assert_eq!(products[1].title, "Ceramic Planter, Large");
    assert_eq!(products[1].url, "https://www.etsy.com/listing/1180022/ceramic-planter");

    let report = AnalysisReport::summarize(&products, base.as_str());
    assert_eq!(report.platform, Platform::Etsy);
    assert_eq!(report.price_stats.avg(), Some(78.33));
    assert_eq!(report.price_stats.max(), Some(145.0));
}

#[test]
fn test_custom_strategy_overrides_builtin() {
    let custom = SelectorStrategy::new(
        "northwind-sale",
        "li.grid__item",
        ".card__heading",
        "a",
        ".price-item--regular",
    );
    let extractor = Extractor::with_custom(&[custom]).unwrap();
    let base = Url::parse("https://northwind.example/").unwrap();

    let Extraction::Found { strategy, products } = extractor.extract(DAWN_FIXTURE, &base) else {
        panic!("expected products");
    };
    assert_eq!(strategy, "northwind-sale");
    // Regular price selector reads the pre-sale price
    assert_eq!(products[1].price.as_deref(), Some("$24.00"));
}

#[test]
fn test_extract_unrecognized_layout() {
    let html = r#"
        <html>
        <body>
            <div class="hero">Our new collection drops Friday</div>
            <section class="newsletter"><a href="/subscribe">Subscribe</a></section>
        </body>
        </html>
    "#;

    let base = Url::parse("https://coming-soon.example/").unwrap();
    let extraction = Extractor::new().extract(html, &base);
    assert!(extraction.is_empty());
    assert!(extraction.products().is_empty());
}
