//! CIN-Resolver: Corporate Identification Number lookup for SimplySetup
//!
//! A CIN is India's 21-character company identifier. This crate validates
//! and decodes it into its fixed-width fields, then resolves it to company
//! metadata through an ordered chain of sources:
//!
//! 1. the static known-company table (no network)
//! 2. a third-party KYC verification API
//! 3. the public company registry page (HTML scrape)
//!
//! The first source that confirms a company name wins. When none does, the
//! resolved record carries `company_name: None`; a name is never invented.

use std::time::Duration;

mod cin;
mod error;
pub mod fakes;
mod kyc;
mod record;
mod registry;
mod resolver;
mod source;
pub mod tables;

pub use cin::{Cin, DecodedCin, ListingStatus};
pub use error::CinError;
pub use kyc::{parse_kyc_response, KycClient, KycConfig};
pub use record::{CompanyRecord, ResolutionSource};
pub use registry::{parse_registry_page, RegistryConfig, RegistryPortalClient};
pub use resolver::CompanyResolver;
pub use source::{CompanySource, KnownCompanies};

/// Result type for cin-resolver operations
pub type Result<T> = std::result::Result<T, CinError>;

/// Default timeout for each outbound lookup request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read a timeout in whole seconds from `var`, falling back to [`DEFAULT_TIMEOUT`].
pub(crate) fn timeout_from_env(var: &str) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT)
}
