//! Built-in demo storefront served without any network access.

use std::sync::LazyLock;
use url::Url;

/// Token that selects the demo storefront when present in the input.
pub const DEMO_TOKEN: &str = "demo";

/// Collection page the demo products pretend to live on.
pub const DEMO_BASE_URL: &str = "https://demo-store.myshopify.com/collections/all";

/// Number of products in [`DEMO_DOCUMENT`].
pub const DEMO_PRODUCT_COUNT: usize = 15;

/// A classic Shopify collection grid. The gift card has no price on purpose.
pub const DEMO_DOCUMENT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>All products - Demo Store</title></head>
<body>
<main class="collection">
  <div class="grid grid--uniform">
    <div class="grid-product"><a class="grid-product__link" href="/products/classic-cotton-t-shirt"><div class="grid-product__title">Classic Cotton T-Shirt</div><div class="grid-product__price">$24.99</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/organic-hoodie"><div class="grid-product__title">Organic Hoodie</div><div class="grid-product__price">$59.00</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/slim-fit-jeans"><div class="grid-product__title">Slim Fit Jeans</div><div class="grid-product__price">$79.50</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/canvas-sneakers"><div class="grid-product__title">Canvas Sneakers</div><div class="grid-product__price">$64.99</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/wool-beanie"><div class="grid-product__title">Wool Beanie</div><div class="grid-product__price">$19.99</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/leather-belt"><div class="grid-product__title">Leather Belt</div><div class="grid-product__price">$34.00</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/rain-jacket"><div class="grid-product__title">Rain Jacket</div><div class="grid-product__price">$129.00</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/linen-shirt"><div class="grid-product__title">Linen Shirt</div><div class="grid-product__price">$49.99</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/everyday-backpack"><div class="grid-product__title">Everyday Backpack</div><div class="grid-product__price">$89.00</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/sports-socks-3-pack"><div class="grid-product__title">Sports Socks (3-pack)</div><div class="grid-product__price">$14.99</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/denim-jacket"><div class="grid-product__title">Denim Jacket</div><div class="grid-product__price">$98.00</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/knit-sweater"><div class="grid-product__title">Knit Sweater</div><div class="grid-product__price">$72.50</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/baseball-cap"><div class="grid-product__title">Baseball Cap</div><div class="grid-product__price">$22.00</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/chino-shorts"><div class="grid-product__title">Chino Shorts</div><div class="grid-product__price">$44.99</div></a></div>
    <div class="grid-product"><a class="grid-product__link" href="/products/gift-card"><div class="grid-product__title">Gift Card</div></a></div>
  </div>
</main>
</body>
</html>
"#;

/// Returns true if the input selects the demo storefront.
pub fn is_demo_input(input: &str) -> bool {
    input.to_lowercase().contains(DEMO_TOKEN)
}

static DEMO_URL: LazyLock<Url> = LazyLock::new(|| Url::parse(DEMO_BASE_URL).unwrap());

/// Base URL of the demo storefront.
pub fn base_url() -> Url {
    DEMO_URL.clone()
}
