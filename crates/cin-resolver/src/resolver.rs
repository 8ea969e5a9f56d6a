//! Ordered fallback chain over [`CompanySource`]s

use tracing::{debug, info, instrument, warn};

use crate::cin::Cin;
use crate::kyc::KycClient;
use crate::record::CompanyRecord;
use crate::registry::RegistryPortalClient;
use crate::source::{CompanySource, KnownCompanies};
use crate::Result;

/// Resolves CINs by trying each source in order until one names the company.
pub struct CompanyResolver {
    sources: Vec<Box<dyn CompanySource>>,
}

impl CompanyResolver {
    /// A resolver with no sources; every CIN resolves to the decoded fallback.
    pub fn new() -> Self {
        CompanyResolver {
            sources: Vec::new(),
        }
    }

    /// Append a source. Sources are tried in insertion order.
    pub fn with_source(mut self, source: impl CompanySource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// The standard chain: known table, KYC API (when configured), registry portal.
    pub fn from_env() -> Result<Self> {
        let mut resolver = CompanyResolver::new().with_source(KnownCompanies::builtin());

        match KycClient::from_env()? {
            Some(kyc) => resolver = resolver.with_source(kyc),
            None => info!("KYC_API_URL/KYC_API_KEY not set, skipping KYC source"),
        }

        Ok(resolver.with_source(RegistryPortalClient::from_env()?))
    }

    /// Names of the configured sources, in order.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Resolve a raw CIN string.
    ///
    /// Only malformed input is an error. Source failures are logged and the
    /// chain moves on; when nothing names the company the record's
    /// `company_name` is `None`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, input: &str) -> Result<CompanyRecord> {
        let cin = Cin::parse(input)?;
        Ok(self.resolve_cin(&cin).await)
    }

    /// Resolve an already-validated CIN. Infallible.
    pub async fn resolve_cin(&self, cin: &Cin) -> CompanyRecord {
        let decoded = cin.decode();

        for source in &self.sources {
            match source.lookup(cin, &decoded).await {
                Ok(Some(record)) if record.is_resolved() => {
                    info!(source = source.name(), "Resolved {}", cin);
                    return record;
                }
                Ok(_) => debug!(source = source.name(), "No data for {}", cin),
                Err(e) => warn!(source = source.name(), error = %e, "Lookup failed for {}", cin),
            }
        }

        info!("No source confirmed a name for {}", cin);
        CompanyRecord::unresolved(cin, &decoded)
    }
}

impl Default for CompanyResolver {
    fn default() -> Self {
        Self::new()
    }
}
