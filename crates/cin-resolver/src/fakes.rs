//! Scripted company sources (testing only)
//!
//! `ScriptedSource` answers every lookup with a fixed outcome and counts how
//! often it was asked, so tests can assert which sources a resolution touched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::cin::{Cin, DecodedCin};
use crate::error::CinError;
use crate::record::{CompanyRecord, ResolutionSource};
use crate::source::CompanySource;
use crate::tables::COUNTRY;
use crate::Result;

#[derive(Debug, Clone)]
enum Outcome {
    Name(String),
    Nothing,
    Fail(String),
}

/// A source with a fixed answer and a shared call counter.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    name: &'static str,
    outcome: Outcome,
    source: ResolutionSource,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    /// Always names the company. Records are tagged `KycApi` unless
    /// [`ScriptedSource::attributed_to`] says otherwise.
    pub fn answering(name: &'static str, company: impl Into<String>) -> Self {
        Self::with_outcome(name, Outcome::Name(company.into()))
    }

    /// Always answers "no data".
    pub fn empty(name: &'static str) -> Self {
        Self::with_outcome(name, Outcome::Nothing)
    }

    /// Always fails with an HTTP error.
    pub fn failing(name: &'static str, reason: impl Into<String>) -> Self {
        Self::with_outcome(name, Outcome::Fail(reason.into()))
    }

    fn with_outcome(name: &'static str, outcome: Outcome) -> Self {
        ScriptedSource {
            name,
            outcome,
            source: ResolutionSource::KycApi,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Tag produced records with `source`.
    pub fn attributed_to(mut self, source: ResolutionSource) -> Self {
        self.source = source;
        self
    }

    /// Shared handle to the call counter; stays valid after the source is boxed.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompanySource for ScriptedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn lookup(&self, cin: &Cin, decoded: &DecodedCin) -> Result<Option<CompanyRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Outcome::Name(company) => Ok(Some(CompanyRecord {
                cin: cin.to_string(),
                company_name: Some(company.clone()),
                status: "Active".to_string(),
                registration_date: decoded.registration_date_guess(),
                address: String::new(),
                state: decoded.state.clone(),
                country: COUNTRY.to_string(),
                directors: Vec::new(),
                authorized_capital: None,
                paid_up_capital: None,
                source: self.source,
            })),
            Outcome::Nothing => Ok(None),
            Outcome::Fail(reason) => Err(CinError::Http(reason.clone())),
        }
    }
}
