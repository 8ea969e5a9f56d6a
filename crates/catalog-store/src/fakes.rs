//! In-memory fake for the catalog store (testing only)
//!
//! `MemoryCatalog` satisfies the `CatalogStore` contract without any external
//! dependencies. Individual collections can be made to fail so callers can
//! exercise partial-failure paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::schema::{
    has_slug, AreaRow, BlogPostRow, CatalogSeed, CompanyRow, LocationRow, WorkspaceRow,
};
use crate::storage_traits::{CatalogStore, Collection, StoreResult};

/// In-memory catalog backed by a `CatalogSeed`.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    seed: Mutex<CatalogSeed>,
    failing: Mutex<HashSet<Collection>>,
    company_page_reads: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: CatalogSeed) -> Self {
        Self {
            seed: Mutex::new(seed),
            ..Self::default()
        }
    }

    /// Make every read of `collection` fail with `StoreError::Unavailable`.
    pub fn fail(&self, collection: Collection) {
        self.failing.lock().unwrap().insert(collection);
    }

    /// Number of `list_companies` calls served so far.
    pub fn company_page_reads(&self) -> usize {
        self.company_page_reads.load(Ordering::SeqCst)
    }

    fn check(&self, collection: Collection) -> StoreResult<()> {
        if self.failing.lock().unwrap().contains(&collection) {
            return Err(StoreError::Unavailable {
                collection,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn sorted_companies(&self) -> Vec<CompanyRow> {
        let seed = self.seed.lock().unwrap();
        let mut rows: Vec<CompanyRow> = seed
            .companies
            .iter()
            .filter(|c| has_slug(&c.slug))
            .map(|c| CompanyRow {
                slug: c.slug.clone().unwrap_or_default(),
                name: c.name.clone(),
                cin: c.cin.clone(),
                updated_at: c.updated_at,
            })
            .collect();
        rows.sort_by(|a, b| a.slug.cmp(&b.slug));
        rows
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_locations(&self) -> StoreResult<Vec<LocationRow>> {
        self.check(Collection::Locations)?;
        let seed = self.seed.lock().unwrap();
        let mut rows: Vec<LocationRow> = seed
            .locations
            .iter()
            .map(|l| LocationRow {
                slug: l.slug.clone(),
                name: l.name.clone(),
                updated_at: l.updated_at,
            })
            .collect();
        rows.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(rows)
    }

    async fn list_areas(&self) -> StoreResult<Vec<AreaRow>> {
        self.check(Collection::Areas)?;
        let seed = self.seed.lock().unwrap();
        let known: HashSet<&str> = seed.locations.iter().map(|l| l.slug.as_str()).collect();
        let mut rows: Vec<AreaRow> = seed
            .areas
            .iter()
            .filter(|a| known.contains(a.location_slug.as_str()))
            .map(|a| AreaRow {
                slug: a.slug.clone(),
                name: a.name.clone(),
                location_slug: a.location_slug.clone(),
                updated_at: a.updated_at,
            })
            .collect();
        rows.sort_by(|a, b| {
            a.location_slug
                .cmp(&b.location_slug)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(rows)
    }

    async fn list_published_posts(&self) -> StoreResult<Vec<BlogPostRow>> {
        self.check(Collection::BlogPosts)?;
        let seed = self.seed.lock().unwrap();
        let mut rows: Vec<BlogPostRow> = seed
            .blog_posts
            .iter()
            .filter(|p| p.published && !p.slug.is_empty())
            .map(|p| BlogPostRow {
                slug: p.slug.clone(),
                title: p.title.clone(),
                updated_at: p.updated_at,
            })
            .collect();
        rows.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(rows)
    }

    async fn list_workspaces(&self) -> StoreResult<Vec<WorkspaceRow>> {
        self.check(Collection::Workspaces)?;
        let seed = self.seed.lock().unwrap();
        let mut rows: Vec<WorkspaceRow> = seed
            .workspaces
            .iter()
            .filter(|w| has_slug(&w.slug))
            .map(|w| WorkspaceRow {
                slug: w.slug.clone().unwrap_or_default(),
                name: w.name.clone(),
                updated_at: w.updated_at,
            })
            .collect();
        rows.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(rows)
    }

    async fn count_companies(&self) -> StoreResult<u64> {
        self.check(Collection::Companies)?;
        Ok(self.sorted_companies().len() as u64)
    }

    async fn list_companies(&self, offset: u64, limit: u64) -> StoreResult<Vec<CompanyRow>> {
        self.company_page_reads.fetch_add(1, Ordering::SeqCst);
        self.check(Collection::Companies)?;
        Ok(self
            .sorted_companies()
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
