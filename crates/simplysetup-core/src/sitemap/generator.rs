//! End-to-end sitemap run
//!
//! Small collections are fetched concurrently and written one file each.
//! Companies are counted, then read and written one chunk at a time so the
//! largest table never sits in memory whole. The index is written last, so a
//! crawler never sees an index that points at files not yet on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use catalog_store::{CatalogStore, Collection, StoreResult};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::config::SitemapConfig;
use super::entry::{SitemapFile, SitemapIndex, UrlEntry};
use super::pages::{
    self, AREAS_FILENAME, BLOG_FILENAME, LOCATIONS_FILENAME, STATIC_FILENAME, WORKSPACES_FILENAME,
};
use super::xml::{render_index, render_urlset};
use super::{INDEX_FILENAME, MAX_URLS_PER_FILE};
use crate::error::SitemapError;
use crate::Result;

/// One `<urlset>` file written during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    pub filename: String,
    pub url_count: usize,
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    /// Urlset files in index order
    pub files: Vec<WrittenFile>,
    pub index_path: PathBuf,
    pub total_urls: usize,
}

/// Generates the full sitemap set from a catalog
pub struct SitemapGenerator {
    store: Arc<dyn CatalogStore>,
    config: SitemapConfig,
    date: Option<NaiveDate>,
}

impl SitemapGenerator {
    pub fn new(store: Arc<dyn CatalogStore>, config: SitemapConfig) -> Self {
        Self {
            store,
            config,
            date: None,
        }
    }

    /// Pin the index `lastmod` date instead of using today (UTC).
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn config(&self) -> &SitemapConfig {
        &self.config
    }

    /// Write every sitemap file and the index into the output directory.
    ///
    /// Storage errors degrade to empty files. Configuration and file-system
    /// errors abort the run.
    #[instrument(skip(self), fields(output_dir = %self.config.output_dir.display()))]
    pub async fn generate(&self) -> Result<GenerationReport> {
        self.config.validate()?;
        let dir = self.config.output_dir.as_path();
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| SitemapError::io(dir, e))?;

        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut index = SitemapIndex::new(date);
        let mut files = Vec::new();

        let (locations, areas, posts, workspaces) = tokio::join!(
            self.store.list_locations(),
            self.store.list_areas(),
            self.store.list_published_posts(),
            self.store.list_workspaces(),
        );

        let small: [(&str, Vec<UrlEntry>); 5] = [
            (STATIC_FILENAME, pages::static_entries()),
            (
                LOCATIONS_FILENAME,
                or_empty(Collection::Locations, locations, pages::location_entry),
            ),
            (
                AREAS_FILENAME,
                or_empty(Collection::Areas, areas, pages::area_entry),
            ),
            (
                BLOG_FILENAME,
                or_empty(Collection::BlogPosts, posts, pages::blog_entry),
            ),
            (
                WORKSPACES_FILENAME,
                or_empty(Collection::Workspaces, workspaces, pages::workspace_entry),
            ),
        ];

        for (filename, entries) in small {
            let written = self.write_urlset(filename, entries, MAX_URLS_PER_FILE).await?;
            index.push(&written.filename);
            files.push(written);
        }

        let chunk_count = self.write_company_chunks(&mut index, &mut files).await?;
        remove_stale_chunks(dir, chunk_count).await?;

        let index_path = dir.join(INDEX_FILENAME);
        write_file(&index_path, render_index(&self.config.base_url, &index)).await?;

        let total_urls = files.iter().map(|f| f.url_count).sum();
        info!(
            files = files.len(),
            company_chunks = chunk_count,
            total_urls,
            "Sitemap generated"
        );

        Ok(GenerationReport {
            files,
            index_path,
            total_urls,
        })
    }

    /// Returns the number of chunk files written.
    async fn write_company_chunks(
        &self,
        index: &mut SitemapIndex,
        files: &mut Vec<WrittenFile>,
    ) -> Result<usize> {
        let count = match self.store.count_companies().await {
            Ok(count) => count,
            Err(e) => {
                warn!(
                    collection = %Collection::Companies,
                    error = %e,
                    "Company count failed, skipping company sitemaps"
                );
                return Ok(0);
            }
        };

        let limit = self.config.max_urls_per_file as u64;
        let chunks = count.div_ceil(limit);
        debug!(count, chunks, limit, "Writing company chunks");

        for n in 0..chunks {
            let rows = self.store.list_companies(n * limit, limit).await;
            let entries = or_empty(Collection::Companies, rows, pages::company_entry);
            let filename = pages::company_chunk_filename(n as usize + 1);
            let written = self
                .write_urlset(&filename, entries, self.config.max_urls_per_file)
                .await?;
            index.push(&written.filename);
            files.push(written);
        }

        Ok(chunks as usize)
    }

    /// Small collections are held to the platform ceiling; only company
    /// chunks use the configured chunk size.
    async fn write_urlset(
        &self,
        filename: &str,
        entries: Vec<UrlEntry>,
        limit: usize,
    ) -> Result<WrittenFile> {
        let file = SitemapFile::new(filename, entries, limit)?;
        let path = self.config.output_dir.join(file.filename());
        write_file(&path, render_urlset(&self.config.base_url, &file)).await?;
        debug!(filename, urls = file.len(), "Wrote sitemap file");

        Ok(WrittenFile {
            filename: file.filename().to_string(),
            url_count: file.len(),
        })
    }
}

fn or_empty<R>(
    collection: Collection,
    rows: StoreResult<Vec<R>>,
    map: impl Fn(&R) -> UrlEntry,
) -> Vec<UrlEntry> {
    match rows {
        Ok(rows) => rows.iter().map(map).collect(),
        Err(e) => {
            warn!(%collection, error = %e, "Catalog read failed, writing empty sitemap");
            Vec::new()
        }
    }
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| SitemapError::io(path, e))
}

/// Delete company chunks numbered above `keep` left over from larger runs.
async fn remove_stale_chunks(dir: &Path, keep: usize) -> Result<()> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| SitemapError::io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| SitemapError::io(dir, e))?
    {
        let name = entry.file_name();
        let Some(n) = name.to_str().and_then(pages::parse_company_chunk) else {
            continue;
        };
        if n > keep {
            let path = entry.path();
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| SitemapError::io(&path, e))?;
            debug!(path = %path.display(), "Removed stale company chunk");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_store::fakes::MemoryCatalog;

    #[tokio::test]
    async fn test_empty_catalog_writes_static_and_empty_files() {
        let tmp = tempfile::tempdir().unwrap();
        let config = SitemapConfig::default().with_output_dir(tmp.path());
        let generator = SitemapGenerator::new(Arc::new(MemoryCatalog::new()), config);

        let report = generator.generate().await.unwrap();

        let names: Vec<_> = report.files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                STATIC_FILENAME,
                LOCATIONS_FILENAME,
                AREAS_FILENAME,
                BLOG_FILENAME,
                WORKSPACES_FILENAME
            ]
        );
        assert_eq!(report.total_urls, pages::STATIC_PAGES.len());
        assert!(report.index_path.ends_with(INDEX_FILENAME));
        assert!(tmp.path().join(BLOG_FILENAME).exists());
    }

    #[tokio::test]
    async fn test_invalid_config_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        let config = SitemapConfig::default()
            .with_output_dir(&out)
            .with_max_urls_per_file(0);
        let generator = SitemapGenerator::new(Arc::new(MemoryCatalog::new()), config);

        let err = generator.generate().await.unwrap_err();
        assert!(matches!(err, SitemapError::InvalidConfig(_)));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_chunk_size_only_applies_to_companies() {
        let tmp = tempfile::tempdir().unwrap();
        let config = SitemapConfig::default()
            .with_output_dir(tmp.path())
            .with_max_urls_per_file(1);
        let generator = SitemapGenerator::new(Arc::new(MemoryCatalog::new()), config);

        let report = generator.generate().await.unwrap();

        assert_eq!(report.files[0].filename, STATIC_FILENAME);
        assert_eq!(report.files[0].url_count, pages::STATIC_PAGES.len());
        assert!(tmp.path().join(INDEX_FILENAME).exists());
    }
}
