//! Schema definitions for the SimplySetup catalog tables
//!
//! Tables:
//! - locations: Cities served by the virtual-office product
//! - areas: Neighbourhoods, each linked to a parent location
//! - blog_posts: Editorial content (only published posts are listed)
//! - workspaces: Coworking spaces offered by vendors
//! - companies: Company profile pages, potentially millions of rows
//!
//! Read-side rows carry only what the sitemap generator needs. Write-side
//! records (`New*`) are used by seed imports and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A location (city) row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRow {
    pub slug: String,
    pub name: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An area row joined to its parent location's slug
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRow {
    pub slug: String,
    pub name: String,
    pub location_slug: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A published blog post row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPostRow {
    pub slug: String,
    pub title: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A workspace row (always has a non-empty slug)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRow {
    pub slug: String,
    pub name: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A company row (always has a non-empty slug)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRow {
    pub slug: String,
    pub name: String,
    pub cin: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Write-side records
// ---------------------------------------------------------------------------

/// New location. The slug doubles as the record key so areas can link to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLocation {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewLocation {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            updated_at: None,
        }
    }

    /// Set the last-modified timestamp
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }
}

/// New area under an existing location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArea {
    pub slug: String,
    pub name: String,
    pub location_slug: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewArea {
    pub fn new(
        location_slug: impl Into<String>,
        slug: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            location_slug: location_slug.into(),
            updated_at: None,
        }
    }
}

/// New blog post; drafts are stored but never listed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlogPost {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewBlogPost {
    pub fn published(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            published: true,
            updated_at: None,
        }
    }

    pub fn draft(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            published: false,
            ..Self::published(slug, title)
        }
    }
}

/// New workspace. A missing or empty slug keeps it out of the sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkspace {
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewWorkspace {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            name: name.into(),
            updated_at: None,
        }
    }

    pub fn without_slug(name: impl Into<String>) -> Self {
        Self {
            slug: None,
            name: name.into(),
            updated_at: None,
        }
    }
}

/// New company profile. A missing or empty slug keeps it out of the sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub cin: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewCompany {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            name: name.into(),
            cin: None,
            updated_at: None,
        }
    }

    pub fn with_cin(mut self, cin: impl Into<String>) -> Self {
        self.cin = Some(cin.into());
        self
    }
}

/// A full catalog snapshot, as accepted by `catalog import`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub locations: Vec<NewLocation>,
    #[serde(default)]
    pub areas: Vec<NewArea>,
    #[serde(default)]
    pub blog_posts: Vec<NewBlogPost>,
    #[serde(default)]
    pub workspaces: Vec<NewWorkspace>,
    #[serde(default)]
    pub companies: Vec<NewCompany>,
}

/// Number of rows written by a seed import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub locations: usize,
    pub areas: usize,
    pub blog_posts: usize,
    pub workspaces: usize,
    pub companies: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.locations + self.areas + self.blog_posts + self.workspaces + self.companies
    }
}

/// Raw row counts per table (including rows the sitemap skips)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub locations: u64,
    pub areas: u64,
    pub blog_posts: u64,
    pub workspaces: u64,
    pub companies: u64,
}

/// Treat `None` and `""` the same way the listing queries do.
pub(crate) fn has_slug(slug: &Option<String>) -> bool {
    slug.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_parses_with_missing_sections() {
        let seed: CatalogSeed = serde_json::from_str(
            r#"{"locations": [{"slug": "pune", "name": "Pune"}],
                "companies": [{"name": "No Slug Pvt Ltd"}]}"#,
        )
        .unwrap();

        assert_eq!(seed.locations.len(), 1);
        assert!(seed.areas.is_empty());
        assert_eq!(seed.companies[0].slug, None);
    }

    #[test]
    fn test_has_slug_rejects_empty() {
        assert!(!has_slug(&None));
        assert!(!has_slug(&Some(String::new())));
        assert!(has_slug(&Some("acme".to_string())));
    }

    #[test]
    fn test_draft_post_is_unpublished() {
        let post = NewBlogPost::draft("wip", "Work in progress");
        assert!(!post.published);
        assert_eq!(post.slug, "wip");
    }
}
