//! Sitemap model, rendering and generation
//!
//! - `entry`: `UrlEntry`, `ChangeFrequency`, `Priority`, `SitemapFile`, `SitemapIndex`
//! - `xml`: `<urlset>` / `<sitemapindex>` rendering with escaped `<loc>`
//! - `pages`: static pages and row → entry mapping per collection
//! - `config`: `SitemapConfig` (base URL, output directory, chunk size)
//! - `generator`: the end-to-end run against a `CatalogStore`

mod config;
mod entry;
mod generator;
pub mod pages;
pub mod xml;

pub use config::SitemapConfig;
pub use entry::{ChangeFrequency, Priority, SitemapFile, SitemapIndex, UrlEntry};
pub use generator::{GenerationReport, SitemapGenerator, WrittenFile};

/// Platform ceiling on `<url>` entries per `<urlset>` file.
pub const MAX_URLS_PER_FILE: usize = 50_000;

/// Name of the top-level index file.
pub const INDEX_FILENAME: &str = "sitemap.xml";
