//! SimplySetup Core
//!
//! Sitemap generation for the SimplySetup site and the tracing setup shared
//! by the workspace binaries.
//!
//! The generator reads the catalog through [`catalog_store::CatalogStore`],
//! maps every row to a [`UrlEntry`], writes one `<urlset>` file per small
//! collection plus as many company chunks as the 50 000-URL ceiling requires,
//! and finally a `sitemap.xml` index referencing all of them.

pub mod error;
pub mod sitemap;
pub mod telemetry;

pub use error::SitemapError;
pub use sitemap::{
    ChangeFrequency, GenerationReport, Priority, SitemapConfig, SitemapFile, SitemapGenerator,
    SitemapIndex, UrlEntry, WrittenFile, INDEX_FILENAME, MAX_URLS_PER_FILE,
};
pub use telemetry::init_tracing;

/// Result type for sitemap operations
pub type Result<T> = std::result::Result<T, SitemapError>;
