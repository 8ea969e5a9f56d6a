//! Sitemap XML rendering
//!
//! Documents are small and flat, so they are built as strings. Only `<loc>`
//! carries user-controlled text; it is escaped with `quick_xml::escape::escape`
//! which covers `& < > ' "`.

use std::fmt::Write as _;

use quick_xml::escape::escape;

use super::entry::{SitemapFile, SitemapIndex};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Join a base URL and a site-relative path with exactly one `/` between them.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Render a `<urlset>` document. An empty file is still a valid document.
pub fn render_urlset(base_url: &str, file: &SitemapFile) -> String {
    let mut out = String::with_capacity(128 + file.len() * 160);
    out.push_str(XML_DECL);
    out.push('\n');
    let _ = writeln!(out, r#"<urlset xmlns="{SITEMAP_NS}">"#);

    for entry in file.entries() {
        out.push_str("  <url>\n");
        let _ = writeln!(
            out,
            "    <loc>{}</loc>",
            escape(&absolute_url(base_url, &entry.path))
        );
        if let Some(date) = entry.last_modified {
            let _ = writeln!(out, "    <lastmod>{}</lastmod>", date.format("%Y-%m-%d"));
        }
        let _ = writeln!(out, "    <changefreq>{}</changefreq>", entry.change_frequency);
        let _ = writeln!(out, "    <priority>{}</priority>", entry.priority);
        out.push_str("  </url>\n");
    }

    out.push_str("</urlset>\n");
    out
}

/// Render the `<sitemapindex>` document.
pub fn render_index(base_url: &str, index: &SitemapIndex) -> String {
    let lastmod = index.generated.format("%Y-%m-%d").to_string();

    let mut out = String::with_capacity(128 + index.files.len() * 128);
    out.push_str(XML_DECL);
    out.push('\n');
    let _ = writeln!(out, r#"<sitemapindex xmlns="{SITEMAP_NS}">"#);

    for filename in &index.files {
        out.push_str("  <sitemap>\n");
        let _ = writeln!(
            out,
            "    <loc>{}</loc>",
            escape(&absolute_url(base_url, filename))
        );
        let _ = writeln!(out, "    <lastmod>{lastmod}</lastmod>");
        out.push_str("  </sitemap>\n");
    }

    out.push_str("</sitemapindex>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::entry::{ChangeFrequency, Priority, UrlEntry};
    use chrono::NaiveDate;

    const BASE: &str = "https://simplysetup.in/";

    #[test]
    fn test_absolute_url_single_slash() {
        assert_eq!(absolute_url(BASE, "/blog"), "https://simplysetup.in/blog");
        assert_eq!(absolute_url(BASE, "blog"), "https://simplysetup.in/blog");
        assert_eq!(absolute_url("https://simplysetup.in", "/"), "https://simplysetup.in/");
    }

    #[test]
    fn test_urlset_escapes_loc() {
        let entry = UrlEntry::new(
            "/blog/tax & <gst> 'guide' \"2024\"",
            ChangeFrequency::Monthly,
            Priority::tenths(7),
        );
        let file = SitemapFile::new("sitemap-blog.xml", vec![entry], 10).unwrap();
        let xml = render_urlset(BASE, &file);

        assert!(xml.contains(
            "<loc>https://simplysetup.in/blog/tax &amp; &lt;gst&gt; &apos;guide&apos; &quot;2024&quot;</loc>"
        ));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_urlset_includes_lastmod_when_known() {
        let entry = UrlEntry::new("/virtual-office/pune", ChangeFrequency::Weekly, Priority::tenths(9))
            .with_last_modified(NaiveDate::from_ymd_opt(2024, 2, 29));
        let file = SitemapFile::new("sitemap-locations.xml", vec![entry], 10).unwrap();

        assert!(render_urlset(BASE, &file).contains("<lastmod>2024-02-29</lastmod>"));
    }

    #[test]
    fn test_empty_urlset_is_well_formed() {
        let file = SitemapFile::new("sitemap-blog.xml", Vec::new(), 10).unwrap();
        let xml = render_urlset(BASE, &file);

        assert!(xml.starts_with(XML_DECL));
        assert!(xml.contains("<urlset"));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_index_lists_each_file_with_date() {
        let mut index = SitemapIndex::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        index.push("sitemap-static.xml");
        index.push("sitemap-companies-1.xml");
        let xml = render_index(BASE, &index);

        assert!(xml.contains("<loc>https://simplysetup.in/sitemap-static.xml</loc>"));
        assert!(xml.contains("<loc>https://simplysetup.in/sitemap-companies-1.xml</loc>"));
        assert_eq!(xml.matches("<lastmod>2026-10-19</lastmod>").count(), 2);
    }
}
