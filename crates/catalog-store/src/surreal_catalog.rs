use std::sync::Arc;

use async_trait::async_trait;

use crate::schema::{AreaRow, BlogPostRow, CompanyRow, LocationRow, WorkspaceRow};
use crate::storage_traits::{CatalogStore, StoreResult};
use crate::SurrealHandle;

/// SurrealDB-backed implementation of the CatalogStore trait.
#[derive(Clone)]
pub struct SurrealCatalog {
    handle: Arc<SurrealHandle>,
}

impl SurrealCatalog {
    pub fn new(handle: Arc<SurrealHandle>) -> Self {
        Self { handle }
    }
}

#[async_trait]
impl CatalogStore for SurrealCatalog {
    async fn list_locations(&self) -> StoreResult<Vec<LocationRow>> {
        self.handle.list_locations().await
    }

    async fn list_areas(&self) -> StoreResult<Vec<AreaRow>> {
        self.handle.list_areas().await
    }

    async fn list_published_posts(&self) -> StoreResult<Vec<BlogPostRow>> {
        self.handle.list_published_posts().await
    }

    async fn list_workspaces(&self) -> StoreResult<Vec<WorkspaceRow>> {
        self.handle.list_workspaces().await
    }

    async fn count_companies(&self) -> StoreResult<u64> {
        self.handle.count_companies().await
    }

    async fn list_companies(&self, offset: u64, limit: u64) -> StoreResult<Vec<CompanyRow>> {
        self.handle.list_companies(offset, limit).await
    }
}
