//! Catalog-Store: SurrealDB Backend for the SimplySetup Catalog
//!
//! This crate provides the persistence layer that the sitemap generator reads
//! from. It owns the catalog schema (locations, areas, blog posts, workspaces,
//! companies) and all I/O with SurrealDB.
//!
//! ## Layer 0 - Data/Persistence
//!
//! Focus: Stable, slug-ordered reads and deterministic pagination.
//!
//! ## Key Components
//!
//! - `SurrealHandle`: Manages connection, schema, inserts and raw queries
//! - `SurrealCatalog`: `CatalogStore` implementation over a shared handle
//! - `CatalogStore`: Backend-agnostic read trait used by the generator
//! - `fakes::MemoryCatalog`: In-memory store with failure injection for tests

mod error;
pub mod fakes;
mod handle;
mod schema;
pub mod storage_traits;
mod surreal_catalog;

pub use error::StoreError;
pub use handle::{CloudConfig, SurrealHandle};
pub use schema::{
    AreaRow, BlogPostRow, CatalogSeed, CatalogStats, CompanyRow, ImportSummary, LocationRow,
    NewArea, NewBlogPost, NewCompany, NewLocation, NewWorkspace, WorkspaceRow,
};
pub use storage_traits::{CatalogStore, Collection, StoreResult};
pub use surreal_catalog::SurrealCatalog;

/// Result type for catalog-store operations
pub type Result<T> = std::result::Result<T, StoreError>;
