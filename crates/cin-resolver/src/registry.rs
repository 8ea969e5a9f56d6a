//! Public company registry page scraper
//!
//! Fetches the registry's company master-data page for a CIN and pulls the
//! name, status, incorporation date and address out of the returned HTML
//! table with regular expressions. The page has no published contract, so
//! any markup change on the registry side silently turns every lookup into
//! "no data". Replace this source with an official API if one appears.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::cin::{Cin, DecodedCin};
use crate::error::CinError;
use crate::record::{normalize_date, CompanyRecord, ResolutionSource};
use crate::source::CompanySource;
use crate::tables::COUNTRY;
use crate::{timeout_from_env, Result, DEFAULT_TIMEOUT};

const SOURCE_NAME: &str = "registry_portal";

pub const DEFAULT_REGISTRY_URL: &str =
    "https://www.mca.gov.in/mcafoportal/companyLLPMasterData.do";

/// Registry portal configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Page URL; the CIN is appended as the `companyID` query parameter
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RegistryConfig {
    pub fn new(base_url: &str) -> Self {
        RegistryConfig {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - REGISTRY_PORTAL_URL (optional, default: public MCA master-data page)
    /// - REGISTRY_TIMEOUT_SECS (optional, default: 10)
    pub fn from_env() -> Self {
        RegistryConfig {
            base_url: std::env::var("REGISTRY_PORTAL_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            timeout: timeout_from_env("REGISTRY_TIMEOUT_SECS"),
        }
    }
}

/// Scraping client for the registry portal
pub struct RegistryPortalClient {
    config: RegistryConfig,
    http_client: reqwest::Client,
}

impl RegistryPortalClient {
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("simplysetup-cin-resolver/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(RegistryPortalClient {
            config,
            http_client,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(RegistryConfig::from_env())
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

#[async_trait]
impl CompanySource for RegistryPortalClient {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn lookup(&self, cin: &Cin, decoded: &DecodedCin) -> Result<Option<CompanyRecord>> {
        info!("Fetching registry page for {}", cin);

        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&[("companyID", cin.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CinError::Http(format!(
                "registry portal returned {} for {}",
                status, cin
            )));
        }

        let html = response.text().await?;
        debug!(bytes = html.len(), "Registry page fetched");
        Ok(parse_registry_page(&html, cin, decoded))
    }
}

struct Patterns {
    name: Regex,
    status: Regex,
    incorporated: Regex,
    address: Regex,
}

/// `<td>Label</td><td>Value</td>` with any attributes and whitespace
fn cell_after(label: &str) -> Regex {
    let pattern = format!(r"(?is)<t[dh][^>]*>\s*{label}\s*</t[dh]>\s*<td[^>]*>\s*([^<]*?)\s*</td>");
    // Labels are fixed literals below
    Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid registry pattern {label}: {e}"))
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        name: cell_after(r"Company\s*Name"),
        status: cell_after(r"Company\s*Status(?:\s*\(for\s*e-filing\))?"),
        incorporated: cell_after(r"Date\s*of\s*Incorporation"),
        address: cell_after(r"Registered\s*Address"),
    })
}

fn capture(re: &Regex, html: &str) -> Option<String> {
    let raw = re.captures(html)?.get(1)?.as_str().trim();
    if raw.is_empty() {
        return None;
    }
    let text = quick_xml::escape::unescape(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Extract a record from registry HTML. `None` when no company name is found.
pub fn parse_registry_page(html: &str, cin: &Cin, decoded: &DecodedCin) -> Option<CompanyRecord> {
    let p = patterns();
    let name = capture(&p.name, html)?;

    Some(CompanyRecord {
        cin: cin.to_string(),
        company_name: Some(name),
        status: capture(&p.status, html).unwrap_or_else(|| "Unknown".to_string()),
        registration_date: capture(&p.incorporated, html)
            .and_then(|raw| normalize_date(&raw))
            .unwrap_or_else(|| decoded.registration_date_guess()),
        address: capture(&p.address, html).unwrap_or_default(),
        state: decoded.state.clone(),
        country: COUNTRY.to_string(),
        directors: Vec::new(),
        authorized_capital: None,
        paid_up_capital: None,
        source: ResolutionSource::RegistryPortal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <table id="resultTab1">
          <tr><td class="lbl">Company Name</td><td>TECHLIFY SOLUTIONS
              PRIVATE LIMITED</td></tr>
          <tr><td>Company Status(for e-filing)</td><td> Active </td></tr>
          <tr><td>Date of Incorporation</td><td>14/06/2022</td></tr>
          <tr><th>Registered Address</th><td>Office 4, Baner &amp; Pashan Link Rd, Pune</td></tr>
        </table>"#;

    fn techlify() -> (Cin, DecodedCin) {
        let cin = Cin::parse("U72900PN2022PTC211370").unwrap();
        let decoded = cin.decode();
        (cin, decoded)
    }

    #[test]
    fn test_parse_master_data_table() {
        let (cin, decoded) = techlify();
        let record = parse_registry_page(PAGE, &cin, &decoded).unwrap();

        assert_eq!(
            record.company_name.as_deref(),
            Some("TECHLIFY SOLUTIONS PRIVATE LIMITED")
        );
        assert_eq!(record.status, "Active");
        assert_eq!(record.registration_date, "2022-06-14");
        assert_eq!(record.address, "Office 4, Baner & Pashan Link Rd, Pune");
        assert_eq!(record.source, ResolutionSource::RegistryPortal);
    }

    #[test]
    fn test_page_without_company_is_none() {
        let (cin, decoded) = techlify();
        let html = "<html><body><p>No record found</p></body></html>";
        assert!(parse_registry_page(html, &cin, &decoded).is_none());
    }

    #[test]
    fn test_empty_name_cell_is_none() {
        let (cin, decoded) = techlify();
        let html = "<table><tr><td>Company Name</td><td>  </td></tr></table>";
        assert!(parse_registry_page(html, &cin, &decoded).is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_decode() {
        let (cin, decoded) = techlify();
        let html = "<table><tr><td>Company Name</td><td>Techlify</td></tr></table>";
        let record = parse_registry_page(html, &cin, &decoded).unwrap();
        assert_eq!(record.status, "Unknown");
        assert_eq!(record.registration_date, "2022-01-01");
        assert_eq!(record.state, "Maharashtra");
    }
}
