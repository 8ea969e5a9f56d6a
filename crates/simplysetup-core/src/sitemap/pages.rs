//! Static pages and per-collection URL mapping

use catalog_store::{AreaRow, BlogPostRow, CompanyRow, LocationRow, WorkspaceRow};
use chrono::{DateTime, NaiveDate, Utc};

use super::entry::{ChangeFrequency, Priority, UrlEntry};

pub const STATIC_FILENAME: &str = "sitemap-static.xml";
pub const LOCATIONS_FILENAME: &str = "sitemap-locations.xml";
pub const AREAS_FILENAME: &str = "sitemap-areas.xml";
pub const BLOG_FILENAME: &str = "sitemap-blog.xml";
pub const WORKSPACES_FILENAME: &str = "sitemap-workspaces.xml";

const COMPANY_CHUNK_PREFIX: &str = "sitemap-companies-";

/// Marketing pages that exist regardless of catalog content.
pub const STATIC_PAGES: &[(&str, ChangeFrequency, Priority)] = &[
    ("/", ChangeFrequency::Daily, Priority::tenths(10)),
    ("/virtual-office", ChangeFrequency::Weekly, Priority::tenths(9)),
    ("/coworking-space", ChangeFrequency::Weekly, Priority::tenths(9)),
    ("/gst-registration", ChangeFrequency::Monthly, Priority::tenths(8)),
    ("/company-registration", ChangeFrequency::Monthly, Priority::tenths(8)),
    ("/pricing", ChangeFrequency::Monthly, Priority::tenths(8)),
    ("/blog", ChangeFrequency::Daily, Priority::tenths(8)),
    ("/about-us", ChangeFrequency::Monthly, Priority::tenths(5)),
    ("/contact-us", ChangeFrequency::Monthly, Priority::tenths(5)),
    ("/privacy-policy", ChangeFrequency::Monthly, Priority::tenths(3)),
    ("/terms-and-conditions", ChangeFrequency::Monthly, Priority::tenths(3)),
    ("/refund-policy", ChangeFrequency::Monthly, Priority::tenths(3)),
];

/// Chunk file name for the 1-based chunk `n`.
pub fn company_chunk_filename(n: usize) -> String {
    format!("{COMPANY_CHUNK_PREFIX}{n}.xml")
}

/// Parse a chunk number back out of a file name.
pub fn parse_company_chunk(filename: &str) -> Option<usize> {
    filename
        .strip_prefix(COMPANY_CHUNK_PREFIX)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

fn day(ts: Option<DateTime<Utc>>) -> Option<NaiveDate> {
    ts.map(|t| t.date_naive())
}

pub fn static_entries() -> Vec<UrlEntry> {
    STATIC_PAGES
        .iter()
        .map(|(path, freq, priority)| UrlEntry::new(*path, *freq, *priority))
        .collect()
}

pub fn location_entry(row: &LocationRow) -> UrlEntry {
    UrlEntry::new(
        format!("/virtual-office/{}", row.slug),
        ChangeFrequency::Weekly,
        Priority::tenths(9),
    )
    .with_last_modified(day(row.updated_at))
}

pub fn area_entry(row: &AreaRow) -> UrlEntry {
    UrlEntry::new(
        format!("/virtual-office/{}/{}", row.location_slug, row.slug),
        ChangeFrequency::Weekly,
        Priority::tenths(8),
    )
    .with_last_modified(day(row.updated_at))
}

pub fn blog_entry(row: &BlogPostRow) -> UrlEntry {
    UrlEntry::new(
        format!("/blog/{}", row.slug),
        ChangeFrequency::Monthly,
        Priority::tenths(7),
    )
    .with_last_modified(day(row.updated_at))
}

pub fn workspace_entry(row: &WorkspaceRow) -> UrlEntry {
    UrlEntry::new(
        format!("/coworking-space/{}", row.slug),
        ChangeFrequency::Weekly,
        Priority::tenths(8),
    )
    .with_last_modified(day(row.updated_at))
}

pub fn company_entry(row: &CompanyRow) -> UrlEntry {
    UrlEntry::new(
        format!("/company/{}", row.slug),
        ChangeFrequency::Monthly,
        Priority::tenths(6),
    )
    .with_last_modified(day(row.updated_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_static_pages_are_unique() {
        let entries = static_entries();
        let mut paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), STATIC_PAGES.len());
        assert_eq!(entries[0].path, "/");
    }

    #[test]
    fn test_area_path_nests_under_location() {
        let row = AreaRow {
            slug: "baner".into(),
            name: "Baner".into(),
            location_slug: "pune".into(),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 3, 5, 23, 59, 0).unwrap()),
        };
        let entry = area_entry(&row);
        assert_eq!(entry.path, "/virtual-office/pune/baner");
        assert_eq!(entry.priority.to_string(), "0.8");
        assert_eq!(entry.last_modified, NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn test_company_entry_without_timestamp() {
        let row = CompanyRow {
            slug: "techlify-solutions".into(),
            name: "Techlify Solutions Private Limited".into(),
            cin: None,
            updated_at: None,
        };
        let entry = company_entry(&row);
        assert_eq!(entry.path, "/company/techlify-solutions");
        assert_eq!(entry.change_frequency, ChangeFrequency::Monthly);
        assert!(entry.last_modified.is_none());
    }

    #[test]
    fn test_chunk_filename_round_trip() {
        assert_eq!(company_chunk_filename(3), "sitemap-companies-3.xml");
        assert_eq!(parse_company_chunk("sitemap-companies-12.xml"), Some(12));
        assert_eq!(parse_company_chunk("sitemap-companies-x.xml"), None);
        assert_eq!(parse_company_chunk("sitemap-blog.xml"), None);
    }
}
