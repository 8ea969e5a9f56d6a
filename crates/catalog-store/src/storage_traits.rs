//! Storage trait definitions for the catalog
//!
//! `CatalogStore` is the read-side abstraction the sitemap generator depends
//! on. Every listing is ordered by slug so output is stable run-to-run, and
//! company listing is paginated so the largest collection never has to be
//! held in memory at once.
//!
//! The trait is async and backend-agnostic. An in-memory fake is provided for
//! testing via the `fakes` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::schema::{AreaRow, BlogPostRow, CompanyRow, LocationRow, WorkspaceRow};

/// Result type for storage operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The catalog collections a store exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Locations,
    Areas,
    BlogPosts,
    Workspaces,
    Companies,
}

impl Collection {
    /// SurrealDB table name
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Locations => "locations",
            Collection::Areas => "areas",
            Collection::BlogPosts => "blog_posts",
            Collection::Workspaces => "workspaces",
            Collection::Companies => "companies",
        }
    }

    pub const ALL: [Collection; 5] = [
        Collection::Locations,
        Collection::Areas,
        Collection::BlogPosts,
        Collection::Workspaces,
        Collection::Companies,
    ];
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// Read access to the catalog.
///
/// Guarantees:
/// - Listings are sorted ascending by slug (areas by parent slug, then slug).
/// - `list_published_posts` never returns drafts.
/// - Workspace and company listings never return rows with an empty slug.
/// - `list_companies(offset, limit)` pages are disjoint for disjoint ranges,
///   and their concatenation equals the full ordered collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All locations.
    async fn list_locations(&self) -> StoreResult<Vec<LocationRow>>;

    /// All areas whose parent location exists.
    async fn list_areas(&self) -> StoreResult<Vec<AreaRow>>;

    /// Published blog posts with a slug.
    async fn list_published_posts(&self) -> StoreResult<Vec<BlogPostRow>>;

    /// Workspaces with a non-empty slug.
    async fn list_workspaces(&self) -> StoreResult<Vec<WorkspaceRow>>;

    /// Number of companies with a non-empty slug.
    async fn count_companies(&self) -> StoreResult<u64>;

    /// One page of companies with a non-empty slug.
    async fn list_companies(&self, offset: u64, limit: u64) -> StoreResult<Vec<CompanyRow>>;
}
