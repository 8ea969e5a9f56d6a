use std::path::PathBuf;

use crate::error::SitemapError;
use crate::Result;

use super::MAX_URLS_PER_FILE;

const DEFAULT_BASE_URL: &str = "https://simplysetup.in";
const DEFAULT_OUTPUT_DIR: &str = "public";

/// Settings for a sitemap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapConfig {
    /// Absolute site origin; a trailing `/` is ignored
    pub base_url: String,
    /// Directory the XML files are written into
    pub output_dir: PathBuf,
    /// URLs per company chunk, at most 50 000
    pub max_urls_per_file: usize,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_urls_per_file: MAX_URLS_PER_FILE,
        }
    }
}

impl SitemapConfig {
    /// Defaults overridden by `SITEMAP_BASE_URL`, `SITEMAP_OUTPUT_DIR` and
    /// `SITEMAP_MAX_URLS`. Empty variables are treated as unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = non_empty_var("SITEMAP_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(dir) = non_empty_var("SITEMAP_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = non_empty_var("SITEMAP_MAX_URLS") {
            config.max_urls_per_file = raw.trim().parse().map_err(|_| {
                SitemapError::InvalidConfig(format!("SITEMAP_MAX_URLS is not a number: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_max_urls_per_file(mut self, limit: usize) -> Self {
        self.max_urls_per_file = limit;
        self
    }

    /// Reject an empty base URL or a chunk size outside `1..=50_000`.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().trim_end_matches('/').is_empty() {
            return Err(SitemapError::InvalidConfig("base URL is empty".to_string()));
        }
        if !(1..=MAX_URLS_PER_FILE).contains(&self.max_urls_per_file) {
            return Err(SitemapError::InvalidConfig(format!(
                "max URLs per file must be between 1 and {MAX_URLS_PER_FILE}, got {}",
                self.max_urls_per_file
            )));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
