//! SurrealDB Handle - Connection and Operations
//!
//! Manages connection and provides methods for:
//! - schema setup for the five catalog tables
//! - inserts used by seed imports
//! - slug-ordered listings and paginated company reads
//!
//! Supports both local (in-memory) and cloud (WebSocket) connections.

use crate::error::StoreError;
use crate::schema::{
    AreaRow, BlogPostRow, CatalogSeed, CatalogStats, CompanyRow, ImportSummary,
    LocationRow, NewArea, NewBlogPost, NewCompany, NewLocation, NewWorkspace, WorkspaceRow,
};
use crate::storage_traits::Collection;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::engine::any::Any;
use surrealdb::opt::auth::{Database, Root};
use surrealdb::sql::Datetime as SurrealDatetime;
use surrealdb::Surreal;
use tracing::{debug, info, instrument};

const DEFAULT_NAMESPACE: &str = "simplysetup";
const DEFAULT_DATABASE: &str = "catalog";

/// Configuration for SurrealDB Cloud connection
#[derive(Debug, Clone)]
pub struct CloudConfig {
    /// WebSocket endpoint URL (e.g., "wss://xxx.aws-use1.surrealdb.cloud")
    pub endpoint: String,
    /// Database username
    pub username: String,
    /// Database password
    pub password: String,
    /// Namespace (default: "simplysetup")
    pub namespace: String,
    /// Database name (default: "catalog")
    pub database: String,
    /// Whether this is a root user (true) or database user (false)
    pub is_root: bool,
}

impl CloudConfig {
    /// Create a new cloud configuration for a database user
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            username: username.into(),
            password: password.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            is_root: false,
        }
    }

    /// Set custom namespace
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = ns.into();
        self
    }

    /// Set custom database
    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        self.database = db.into();
        self
    }

    /// Set whether this is a root user
    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = is_root;
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - SURREALDB_ENDPOINT (required)
    /// - SURREALDB_USERNAME (required)
    /// - SURREALDB_PASSWORD (required)
    /// - SURREALDB_NAMESPACE (optional, default: "simplysetup")
    /// - SURREALDB_DATABASE (optional, default: "catalog")
    /// - SURREALDB_ROOT (optional, default: "false")
    pub fn from_env() -> std::result::Result<Self, String> {
        let endpoint =
            std::env::var("SURREALDB_ENDPOINT").map_err(|_| "SURREALDB_ENDPOINT not set")?;
        let username =
            std::env::var("SURREALDB_USERNAME").map_err(|_| "SURREALDB_USERNAME not set")?;
        let password =
            std::env::var("SURREALDB_PASSWORD").map_err(|_| "SURREALDB_PASSWORD not set")?;
        let namespace = std::env::var("SURREALDB_NAMESPACE")
            .unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());
        let database =
            std::env::var("SURREALDB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());
        let is_root = std::env::var("SURREALDB_ROOT")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            endpoint,
            username,
            password,
            namespace,
            database,
            is_root,
        })
    }
}

/// SurrealDB connection handle for the catalog
#[derive(Clone)]
pub struct SurrealHandle {
    db: Surreal<Any>,
}

// Rows as SurrealDB returns them; datetimes arrive as SurrealDB datetimes.

#[derive(Debug, Deserialize)]
struct DbLocationRow {
    slug: String,
    name: String,
    #[serde(default)]
    updated_at: Option<SurrealDatetime>,
}

#[derive(Debug, Deserialize)]
struct DbAreaRow {
    slug: String,
    name: String,
    location_slug: String,
    #[serde(default)]
    updated_at: Option<SurrealDatetime>,
}

#[derive(Debug, Deserialize)]
struct DbBlogPostRow {
    slug: String,
    title: String,
    #[serde(default)]
    updated_at: Option<SurrealDatetime>,
}

#[derive(Debug, Deserialize)]
struct DbWorkspaceRow {
    slug: String,
    name: String,
    #[serde(default)]
    updated_at: Option<SurrealDatetime>,
}

#[derive(Debug, Deserialize)]
struct DbCompanyRow {
    slug: String,
    name: String,
    #[serde(default)]
    cin: Option<String>,
    #[serde(default)]
    updated_at: Option<SurrealDatetime>,
}

#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

fn from_surreal(at: Option<SurrealDatetime>) -> Option<DateTime<Utc>> {
    at.map(DateTime::<Utc>::from)
}

fn to_surreal(at: Option<DateTime<Utc>>) -> Option<SurrealDatetime> {
    at.map(SurrealDatetime::from)
}

impl SurrealHandle {
    /// Connect to SurrealDB in-memory and set up schema
    #[instrument(skip_all)]
    pub async fn setup_db() -> Result<Self> {
        info!("Connecting to SurrealDB (in-memory)");

        let db = surrealdb::engine::any::connect("mem://")
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        db.use_ns(DEFAULT_NAMESPACE)
            .use_db(DEFAULT_DATABASE)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let handle = SurrealHandle { db };
        handle.init_schema().await?;

        info!("SurrealDB connected and schema initialized");
        Ok(handle)
    }

    /// Connect to SurrealDB Cloud
    #[instrument(skip(config), fields(endpoint = %config.endpoint, namespace = %config.namespace, database = %config.database))]
    pub async fn setup_cloud(config: CloudConfig) -> Result<Self> {
        info!("Connecting to SurrealDB Cloud (root={})", config.is_root);

        let db = surrealdb::engine::any::connect(&config.endpoint)
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Failed to connect to {}: {}", config.endpoint, e))
            })?;

        if config.is_root {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await
            .map_err(|e| StoreError::Connection(format!("Root authentication failed: {}", e)))?;
        } else {
            db.signin(Database {
                namespace: &config.namespace,
                database: &config.database,
                username: &config.username,
                password: &config.password,
            })
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Database authentication failed: {}", e))
            })?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(|e| {
                StoreError::Connection(format!("Failed to select namespace/database: {}", e))
            })?;

        let handle = SurrealHandle { db };
        handle.init_schema().await?;

        info!("SurrealDB Cloud connected and schema initialized");
        Ok(handle)
    }

    /// Connect to a SurrealDB URL (`ws://`, `wss://`, `surrealkv://`, `mem://`)
    #[instrument(skip_all)]
    pub async fn setup_url(url: &str) -> Result<Self> {
        info!("Connecting to {}", url);
        let db = surrealdb::engine::any::connect(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        db.use_ns(DEFAULT_NAMESPACE)
            .use_db(DEFAULT_DATABASE)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let handle = SurrealHandle { db };
        handle.init_schema().await?;
        Ok(handle)
    }

    /// Connect to the database named by the environment, never in-memory.
    ///
    /// If SURREALDB_ENDPOINT is set, connects to cloud (credentials required).
    /// If SURREALDB_URL is set, connects to that URL.
    /// Otherwise fails with `StoreError::NotConfigured`.
    #[instrument(skip_all)]
    pub async fn setup_configured() -> Result<Self> {
        if non_empty_var("SURREALDB_ENDPOINT").is_some() {
            let config = CloudConfig::from_env().map_err(StoreError::NotConfigured)?;
            info!("Cloud config found, connecting to SurrealDB Cloud");
            return Self::setup_cloud(config).await;
        }

        if let Some(url) = non_empty_var("SURREALDB_URL") {
            return Self::setup_url(&url).await;
        }

        Err(StoreError::NotConfigured(
            "neither SURREALDB_ENDPOINT nor SURREALDB_URL is set".to_string(),
        ))
    }

    /// Connect using environment variables, falling back to in-memory.
    ///
    /// Same as [`SurrealHandle::setup_configured`], except that a missing
    /// configuration yields an empty `mem://` database.
    #[instrument(skip_all)]
    pub async fn setup_from_env() -> Result<Self> {
        match Self::setup_configured().await {
            Err(StoreError::NotConfigured(reason)) => {
                info!(%reason, "No database configured, using in-memory database");
                Self::setup_db().await
            }
            other => other,
        }
    }

    /// Initialize the catalog schema
    async fn init_schema(&self) -> Result<()> {
        debug!("Initializing catalog schema");

        let schema = r#"
            -- Locations (cities); record key is the slug
            DEFINE TABLE IF NOT EXISTS locations SCHEMAFULL;
            DEFINE FIELD IF NOT EXISTS slug ON locations TYPE string;
            DEFINE FIELD IF NOT EXISTS name ON locations TYPE string;
            DEFINE FIELD IF NOT EXISTS updated_at ON locations TYPE option<datetime>;
            DEFINE INDEX IF NOT EXISTS idx_location_slug ON locations FIELDS slug UNIQUE;

            -- Areas, linked to their parent location
            DEFINE TABLE IF NOT EXISTS areas SCHEMAFULL;
            DEFINE FIELD IF NOT EXISTS slug ON areas TYPE string;
            DEFINE FIELD IF NOT EXISTS name ON areas TYPE string;
            DEFINE FIELD IF NOT EXISTS location ON areas TYPE record<locations>;
            DEFINE FIELD IF NOT EXISTS updated_at ON areas TYPE option<datetime>;
            DEFINE INDEX IF NOT EXISTS idx_area_location_slug ON areas FIELDS location, slug UNIQUE;

            -- Blog posts
            DEFINE TABLE IF NOT EXISTS blog_posts SCHEMAFULL;
            DEFINE FIELD IF NOT EXISTS slug ON blog_posts TYPE string;
            DEFINE FIELD IF NOT EXISTS title ON blog_posts TYPE string;
            DEFINE FIELD IF NOT EXISTS published ON blog_posts TYPE bool DEFAULT false;
            DEFINE FIELD IF NOT EXISTS updated_at ON blog_posts TYPE option<datetime>;
            DEFINE INDEX IF NOT EXISTS idx_post_slug ON blog_posts FIELDS slug UNIQUE;

            -- Workspaces (slug may be missing for unlisted spaces)
            DEFINE TABLE IF NOT EXISTS workspaces SCHEMAFULL;
            DEFINE FIELD IF NOT EXISTS slug ON workspaces TYPE option<string>;
            DEFINE FIELD IF NOT EXISTS name ON workspaces TYPE string;
            DEFINE FIELD IF NOT EXISTS updated_at ON workspaces TYPE option<datetime>;
            DEFINE INDEX IF NOT EXISTS idx_workspace_slug ON workspaces FIELDS slug;

            -- Companies (largest table, paginated by slug)
            DEFINE TABLE IF NOT EXISTS companies SCHEMAFULL;
            DEFINE FIELD IF NOT EXISTS slug ON companies TYPE option<string>;
            DEFINE FIELD IF NOT EXISTS name ON companies TYPE string;
            DEFINE FIELD IF NOT EXISTS cin ON companies TYPE option<string>;
            DEFINE FIELD IF NOT EXISTS updated_at ON companies TYPE option<datetime>;
            DEFINE INDEX IF NOT EXISTS idx_company_slug ON companies FIELDS slug;
        "#;

        self.db
            .query(schema)
            .await
            .map_err(|e| StoreError::SchemaSetup(e.to_string()))?
            .check()
            .map_err(|e| StoreError::SchemaSetup(e.to_string()))?;

        debug!("Schema initialized successfully");
        Ok(())
    }

    // ========== Insert Operations ==========

    /// Create a location keyed by its slug
    #[instrument(skip(self, location), fields(slug = %location.slug))]
    pub async fn create_location(&self, location: &NewLocation) -> Result<()> {
        debug!("Creating location");

        self.db
            .query(
                "CREATE type::thing('locations', $slug) \
                 SET slug = $slug, name = $name, updated_at = $updated_at",
            )
            .bind(("slug", location.slug.clone()))
            .bind(("name", location.name.clone()))
            .bind(("updated_at", to_surreal(location.updated_at)))
            .await?
            .check()?;
        Ok(())
    }

    /// Create an area linked to an existing location
    #[instrument(skip(self, area), fields(location = %area.location_slug, slug = %area.slug))]
    pub async fn create_area(&self, area: &NewArea) -> Result<()> {
        debug!("Creating area");

        let mut result = self
            .db
            .query("SELECT slug FROM type::thing('locations', $location)")
            .bind(("location", area.location_slug.clone()))
            .await?;

        #[derive(Deserialize)]
        struct SlugOnly {
            #[allow(dead_code)]
            slug: String,
        }

        let parents: Vec<SlugOnly> = result.take(0)?;
        if parents.is_empty() {
            return Err(StoreError::InvalidSeed(format!(
                "area '{}' references unknown location '{}'",
                area.slug, area.location_slug
            )));
        }

        self.db
            .query(
                "CREATE areas SET slug = $slug, name = $name, \
                 location = type::thing('locations', $location), updated_at = $updated_at",
            )
            .bind(("slug", area.slug.clone()))
            .bind(("name", area.name.clone()))
            .bind(("location", area.location_slug.clone()))
            .bind(("updated_at", to_surreal(area.updated_at)))
            .await?
            .check()?;
        Ok(())
    }

    /// Create a blog post (published or draft)
    #[instrument(skip(self, post), fields(slug = %post.slug, published = post.published))]
    pub async fn create_blog_post(&self, post: &NewBlogPost) -> Result<()> {
        debug!("Creating blog post");

        self.db
            .query(
                "CREATE blog_posts SET slug = $slug, title = $title, \
                 published = $published, updated_at = $updated_at",
            )
            .bind(("slug", post.slug.clone()))
            .bind(("title", post.title.clone()))
            .bind(("published", post.published))
            .bind(("updated_at", to_surreal(post.updated_at)))
            .await?
            .check()?;
        Ok(())
    }

    /// Create a workspace
    #[instrument(skip(self, workspace), fields(name = %workspace.name))]
    pub async fn create_workspace(&self, workspace: &NewWorkspace) -> Result<()> {
        debug!("Creating workspace");

        self.db
            .query(
                "CREATE workspaces SET slug = $slug, name = $name, updated_at = $updated_at",
            )
            .bind(("slug", workspace.slug.clone()))
            .bind(("name", workspace.name.clone()))
            .bind(("updated_at", to_surreal(workspace.updated_at)))
            .await?
            .check()?;
        Ok(())
    }

    /// Create a company profile
    #[instrument(skip(self, company), fields(name = %company.name))]
    pub async fn create_company(&self, company: &NewCompany) -> Result<()> {
        self.db
            .query(
                "CREATE companies SET slug = $slug, name = $name, cin = $cin, \
                 updated_at = $updated_at",
            )
            .bind(("slug", company.slug.clone()))
            .bind(("name", company.name.clone()))
            .bind(("cin", company.cin.clone()))
            .bind(("updated_at", to_surreal(company.updated_at)))
            .await?
            .check()?;
        Ok(())
    }

    /// Import a full seed. Locations go first so areas can link to them.
    #[instrument(skip_all)]
    pub async fn import_seed(&self, seed: &CatalogSeed) -> Result<ImportSummary> {
        let mut summary = ImportSummary::default();

        for location in &seed.locations {
            self.create_location(location).await?;
            summary.locations += 1;
        }
        for area in &seed.areas {
            self.create_area(area).await?;
            summary.areas += 1;
        }
        for post in &seed.blog_posts {
            self.create_blog_post(post).await?;
            summary.blog_posts += 1;
        }
        for workspace in &seed.workspaces {
            self.create_workspace(workspace).await?;
            summary.workspaces += 1;
        }
        for company in &seed.companies {
            self.create_company(company).await?;
            summary.companies += 1;
        }

        info!(rows = summary.total(), "Seed imported");
        Ok(summary)
    }

    // ========== Listing Operations ==========

    /// List all locations ordered by slug
    #[instrument(skip(self))]
    pub async fn list_locations(&self) -> Result<Vec<LocationRow>> {
        let mut result = self
            .db
            .query("SELECT slug, name, updated_at FROM locations ORDER BY slug ASC")
            .await?;

        let rows: Vec<DbLocationRow> = result.take(0)?;
        debug!(count = rows.len(), "Fetched locations");
        Ok(rows
            .into_iter()
            .map(|r| LocationRow {
                slug: r.slug,
                name: r.name,
                updated_at: from_surreal(r.updated_at),
            })
            .collect())
    }

    /// List areas joined to their parent location's slug
    #[instrument(skip(self))]
    pub async fn list_areas(&self) -> Result<Vec<AreaRow>> {
        let mut result = self
            .db
            .query(
                "SELECT slug, name, location.slug AS location_slug, updated_at FROM areas \
                 WHERE location.slug != NONE \
                 ORDER BY location_slug ASC, slug ASC",
            )
            .await?;

        let rows: Vec<DbAreaRow> = result.take(0)?;
        debug!(count = rows.len(), "Fetched areas");
        Ok(rows
            .into_iter()
            .map(|r| AreaRow {
                slug: r.slug,
                name: r.name,
                location_slug: r.location_slug,
                updated_at: from_surreal(r.updated_at),
            })
            .collect())
    }

    /// List published blog posts ordered by slug
    #[instrument(skip(self))]
    pub async fn list_published_posts(&self) -> Result<Vec<BlogPostRow>> {
        let mut result = self
            .db
            .query(
                "SELECT slug, title, updated_at FROM blog_posts \
                 WHERE published = true AND slug != '' \
                 ORDER BY slug ASC",
            )
            .await?;

        let rows: Vec<DbBlogPostRow> = result.take(0)?;
        debug!(count = rows.len(), "Fetched published posts");
        Ok(rows
            .into_iter()
            .map(|r| BlogPostRow {
                slug: r.slug,
                title: r.title,
                updated_at: from_surreal(r.updated_at),
            })
            .collect())
    }

    /// List workspaces that have a slug
    #[instrument(skip(self))]
    pub async fn list_workspaces(&self) -> Result<Vec<WorkspaceRow>> {
        let mut result = self
            .db
            .query(
                "SELECT slug, name, updated_at FROM workspaces \
                 WHERE slug != NONE AND slug != '' \
                 ORDER BY slug ASC",
            )
            .await?;

        let rows: Vec<DbWorkspaceRow> = result.take(0)?;
        debug!(count = rows.len(), "Fetched workspaces");
        Ok(rows
            .into_iter()
            .map(|r| WorkspaceRow {
                slug: r.slug,
                name: r.name,
                updated_at: from_surreal(r.updated_at),
            })
            .collect())
    }

    /// Count companies that have a slug
    #[instrument(skip(self))]
    pub async fn count_companies(&self) -> Result<u64> {
        let mut result = self
            .db
            .query(
                "SELECT count() AS total FROM companies \
                 WHERE slug != NONE AND slug != '' GROUP ALL",
            )
            .await?;

        let counts: Vec<CountRow> = result.take(0)?;
        Ok(counts.first().map(|c| c.total).unwrap_or(0))
    }

    /// Fetch one page of companies ordered by slug
    #[instrument(skip(self))]
    pub async fn list_companies(&self, offset: u64, limit: u64) -> Result<Vec<CompanyRow>> {
        let mut result = self
            .db
            .query(
                "SELECT slug, name, cin, updated_at FROM companies \
                 WHERE slug != NONE AND slug != '' \
                 ORDER BY slug ASC LIMIT $limit START $start",
            )
            .bind(("limit", limit))
            .bind(("start", offset))
            .await?;

        let rows: Vec<DbCompanyRow> = result.take(0)?;
        debug!(count = rows.len(), "Fetched company page");
        Ok(rows
            .into_iter()
            .map(|r| CompanyRow {
                slug: r.slug,
                name: r.name,
                cin: r.cin,
                updated_at: from_surreal(r.updated_at),
            })
            .collect())
    }

    // ========== Statistics ==========

    /// Raw row count of a single table
    async fn count_table(&self, collection: Collection) -> Result<u64> {
        let mut result = self
            .db
            .query(format!(
                "SELECT count() AS total FROM {} GROUP ALL",
                collection.table()
            ))
            .await?;

        let counts: Vec<CountRow> = result.take(0)?;
        Ok(counts.first().map(|c| c.total).unwrap_or(0))
    }

    /// Row counts for every catalog table
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<CatalogStats> {
        Ok(CatalogStats {
            locations: self.count_table(Collection::Locations).await?,
            areas: self.count_table(Collection::Areas).await?,
            blog_posts: self.count_table(Collection::BlogPosts).await?,
            workspaces: self.count_table(Collection::Workspaces).await?,
            companies: self.count_table(Collection::Companies).await?,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
