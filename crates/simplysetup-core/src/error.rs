//! Error types for sitemap generation

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a sitemap run.
///
/// Storage failures are not listed here: they are logged per collection and
/// produce empty files instead.
#[derive(Error, Debug)]
pub enum SitemapError {
    /// Configuration is unusable
    #[error("Invalid sitemap configuration: {0}")]
    InvalidConfig(String),

    /// A file would exceed the per-file URL ceiling
    #[error("{filename} would hold {count} URLs, limit is {limit}")]
    TooManyUrls {
        filename: String,
        count: usize,
        limit: usize,
    },

    /// Writing output failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SitemapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SitemapError::Io {
            path: path.into(),
            source,
        }
    }
}
