//! Storefront access: HTTP fetching, demo document, and product extraction.

pub mod client;
pub mod demo;
pub mod models;
pub mod parser;
pub mod platform;
pub mod selectors;
pub mod target;

pub use client::{DocumentSource, StoreClient};
pub use models::{Extraction, ProductRecord};
pub use parser::Extractor;
pub use platform::Platform;
pub use selectors::SelectorStrategy;
pub use target::StoreTarget;
