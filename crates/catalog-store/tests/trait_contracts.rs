//! Trait contract tests for CatalogStore.
//!
//! The same behavioral contract is checked against the in-memory fake and the
//! in-memory SurrealDB implementation. Any conforming backend must pass these.

use std::sync::Arc;

use catalog_store::fakes::MemoryCatalog;
use catalog_store::{
    CatalogSeed, CatalogStore, Collection, NewArea, NewBlogPost, NewCompany, NewLocation,
    NewWorkspace, StoreError, SurrealCatalog, SurrealHandle,
};

fn sample_seed() -> CatalogSeed {
    CatalogSeed {
        locations: vec![
            NewLocation::new("pune", "Pune"),
            NewLocation::new("bangalore", "Bangalore"),
            NewLocation::new("mumbai", "Mumbai"),
        ],
        areas: vec![
            NewArea::new("pune", "kothrud", "Kothrud"),
            NewArea::new("bangalore", "koramangala", "Koramangala"),
            NewArea::new("pune", "baner", "Baner"),
        ],
        blog_posts: vec![
            NewBlogPost::published("gst-registration-guide", "GST Registration Guide"),
            NewBlogPost::draft("unfinished", "Unfinished"),
            NewBlogPost::published("virtual-office-benefits", "Virtual Office Benefits"),
        ],
        workspaces: vec![
            NewWorkspace::new("wework-bkc", "WeWork BKC"),
            NewWorkspace::without_slug("Hidden Space"),
            NewWorkspace {
                slug: Some(String::new()),
                name: "Empty Slug Space".to_string(),
                updated_at: None,
            },
            NewWorkspace::new("awfis-baner", "Awfis Baner"),
        ],
        companies: (0..7)
            .rev()
            .map(|i| NewCompany::new(format!("company-{i:02}"), format!("Company {i}")))
            .chain(std::iter::once(NewCompany {
                slug: None,
                name: "Unlisted Co".to_string(),
                cin: None,
                updated_at: None,
            }))
            .collect(),
    }
}

async fn surreal_store() -> SurrealCatalog {
    let handle = SurrealHandle::setup_db().await.unwrap();
    handle.import_seed(&sample_seed()).await.unwrap();
    SurrealCatalog::new(Arc::new(handle))
}

fn memory_store() -> MemoryCatalog {
    MemoryCatalog::from_seed(sample_seed())
}

async fn assert_listings_sorted(store: &dyn CatalogStore) {
    let locations: Vec<String> = store
        .list_locations()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.slug)
        .collect();
    assert_eq!(locations, vec!["bangalore", "mumbai", "pune"]);

    let areas: Vec<(String, String)> = store
        .list_areas()
        .await
        .unwrap()
        .into_iter()
        .map(|a| (a.location_slug, a.slug))
        .collect();
    assert_eq!(
        areas,
        vec![
            ("bangalore".to_string(), "koramangala".to_string()),
            ("pune".to_string(), "baner".to_string()),
            ("pune".to_string(), "kothrud".to_string()),
        ]
    );
}

async fn assert_filters_applied(store: &dyn CatalogStore) {
    let posts: Vec<String> = store
        .list_published_posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.slug)
        .collect();
    assert_eq!(posts, vec!["gst-registration-guide", "virtual-office-benefits"]);

    let workspaces: Vec<String> = store
        .list_workspaces()
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.slug)
        .collect();
    assert_eq!(workspaces, vec!["awfis-baner", "wework-bkc"]);

    assert_eq!(store.count_companies().await.unwrap(), 7);
}

async fn assert_pages_partition_collection(store: &dyn CatalogStore) {
    let total = store.count_companies().await.unwrap();
    let limit = 3;
    let mut seen = Vec::new();
    let mut offset = 0;
    while offset < total {
        let page = store.list_companies(offset, limit).await.unwrap();
        assert!(page.len() as u64 <= limit);
        seen.extend(page.into_iter().map(|c| c.slug));
        offset += limit;
    }

    let expected: Vec<String> = (0..7).map(|i| format!("company-{i:02}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn memory_listings_are_sorted_by_slug() {
    assert_listings_sorted(&memory_store()).await;
}

#[tokio::test]
async fn surreal_listings_are_sorted_by_slug() {
    assert_listings_sorted(&surreal_store().await).await;
}

#[tokio::test]
async fn memory_listings_apply_filters() {
    assert_filters_applied(&memory_store()).await;
}

#[tokio::test]
async fn surreal_listings_apply_filters() {
    assert_filters_applied(&surreal_store().await).await;
}

#[tokio::test]
async fn memory_company_pages_partition_collection() {
    assert_pages_partition_collection(&memory_store()).await;
}

#[tokio::test]
async fn surreal_company_pages_partition_collection() {
    assert_pages_partition_collection(&surreal_store().await).await;
}

#[tokio::test]
async fn surreal_page_past_end_is_empty() {
    let store = surreal_store().await;
    let page = store.list_companies(100, 10).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn memory_injected_failure_is_isolated() {
    let store = memory_store();
    store.fail(Collection::BlogPosts);

    let err = store.list_published_posts().await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Unavailable {
            collection: Collection::BlogPosts,
            ..
        }
    ));

    // Other collections are unaffected
    assert_eq!(store.list_locations().await.unwrap().len(), 3);
}

#[tokio::test]
async fn empty_store_has_no_companies() {
    let store = SurrealCatalog::new(Arc::new(SurrealHandle::setup_db().await.unwrap()));
    assert_eq!(store.count_companies().await.unwrap(), 0);
    assert!(store.list_locations().await.unwrap().is_empty());
}
