//! The `CompanySource` seam and the offline known-company source

use std::collections::HashMap;

use async_trait::async_trait;

use crate::cin::{Cin, DecodedCin};
use crate::record::CompanyRecord;
use crate::tables::KNOWN_COMPANIES;
use crate::Result;

/// One attempt in the resolution chain.
///
/// Returns `Ok(None)` when the source has no answer. Errors are logged by the
/// resolver and treated the same as `Ok(None)`.
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Look up a company by CIN.
    async fn lookup(&self, cin: &Cin, decoded: &DecodedCin) -> Result<Option<CompanyRecord>>;
}

/// Verified CIN → name mapping held in memory.
#[derive(Debug, Clone)]
pub struct KnownCompanies {
    names: HashMap<String, String>,
}

impl Default for KnownCompanies {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KnownCompanies {
    /// The table shipped with the crate.
    pub fn builtin() -> Self {
        KnownCompanies {
            names: KNOWN_COMPANIES
                .iter()
                .map(|(cin, name)| (cin.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// An empty table.
    pub fn empty() -> Self {
        KnownCompanies {
            names: HashMap::new(),
        }
    }

    /// Add or replace an entry.
    pub fn with_entry(mut self, cin: &Cin, name: impl Into<String>) -> Self {
        self.names.insert(cin.as_str().to_string(), name.into());
        self
    }

    pub fn get(&self, cin: &Cin) -> Option<&str> {
        self.names.get(cin.as_str()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl CompanySource for KnownCompanies {
    fn name(&self) -> &'static str {
        "known_table"
    }

    async fn lookup(&self, cin: &Cin, decoded: &DecodedCin) -> Result<Option<CompanyRecord>> {
        Ok(self
            .get(cin)
            .map(|name| CompanyRecord::known(cin, decoded, name)))
    }
}
