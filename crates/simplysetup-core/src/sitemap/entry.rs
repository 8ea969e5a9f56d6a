use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SitemapError;

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crawl priority in `[0.0, 1.0]`, held as whole tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Priority(u8);

impl Priority {
    /// Clamp into `[0, 1]` and round to the nearest tenth. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Priority(0);
        }
        Priority((value.clamp(0.0, 1.0) * 10.0).round() as u8)
    }

    pub const fn tenths(tenths: u8) -> Self {
        Priority(if tenths > 10 { 10 } else { tenths })
    }

    pub fn value(&self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// One `<url>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    /// Site-relative path, unescaped
    pub path: String,
    pub change_frequency: ChangeFrequency,
    pub priority: Priority,
    pub last_modified: Option<NaiveDate>,
}

impl UrlEntry {
    pub fn new(path: impl Into<String>, change_frequency: ChangeFrequency, priority: Priority) -> Self {
        UrlEntry {
            path: path.into(),
            change_frequency,
            priority,
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, date: Option<NaiveDate>) -> Self {
        self.last_modified = date;
        self
    }
}

/// A `<urlset>` document, capped at a URL limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapFile {
    filename: String,
    entries: Vec<UrlEntry>,
}

impl SitemapFile {
    /// Fails if `entries` exceeds `limit`.
    pub fn new(
        filename: impl Into<String>,
        entries: Vec<UrlEntry>,
        limit: usize,
    ) -> Result<Self, SitemapError> {
        let filename = filename.into();
        if entries.len() > limit {
            return Err(SitemapError::TooManyUrls {
                filename,
                count: entries.len(),
                limit,
            });
        }
        Ok(SitemapFile { filename, entries })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The `<sitemapindex>` document, rebuilt on every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapIndex {
    pub files: Vec<String>,
    pub generated: NaiveDate,
}

impl SitemapIndex {
    pub fn new(generated: NaiveDate) -> Self {
        SitemapIndex {
            files: Vec::new(),
            generated,
        }
    }

    /// Record a written file. Duplicates are ignored.
    pub fn push(&mut self, filename: &str) {
        if !self.files.iter().any(|f| f == filename) {
            self.files.push(filename.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rounds_to_one_decimal() {
        assert_eq!(Priority::new(0.86).to_string(), "0.9");
        assert_eq!(Priority::new(0.84).to_string(), "0.8");
        assert_eq!(Priority::new(1.0).to_string(), "1.0");
        assert_eq!(Priority::new(0.0).to_string(), "0.0");
    }

    #[test]
    fn test_priority_clamps() {
        assert_eq!(Priority::new(3.5), Priority::tenths(10));
        assert_eq!(Priority::new(-1.0), Priority::tenths(0));
        assert_eq!(Priority::new(f64::NAN), Priority::tenths(0));
        assert_eq!(Priority::tenths(42).value(), 1.0);
    }

    #[test]
    fn test_file_rejects_overflow() {
        let entries = vec![
            UrlEntry::new("/a", ChangeFrequency::Daily, Priority::tenths(5));
            3
        ];
        let err = SitemapFile::new("sitemap-x.xml", entries.clone(), 2).unwrap_err();
        assert!(matches!(err, SitemapError::TooManyUrls { count: 3, limit: 2, .. }));

        let file = SitemapFile::new("sitemap-x.xml", entries, 3).unwrap();
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn test_index_ignores_duplicates() {
        let mut index = SitemapIndex::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        index.push("sitemap-static.xml");
        index.push("sitemap-static.xml");
        assert_eq!(index.files.len(), 1);
    }
}
