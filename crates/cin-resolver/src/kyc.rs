//! KYC verification API client
//!
//! Posts the CIN to a third-party company-verification endpoint and maps the
//! JSON answer onto a [`CompanyRecord`]. State and country always come from
//! the local decode, not from the API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::cin::{Cin, DecodedCin};
use crate::error::CinError;
use crate::record::{normalize_date, CompanyRecord, ResolutionSource};
use crate::source::CompanySource;
use crate::tables::COUNTRY;
use crate::{timeout_from_env, Result, DEFAULT_TIMEOUT};

const SOURCE_NAME: &str = "kyc_api";

/// KYC API configuration
#[derive(Debug, Clone)]
pub struct KycConfig {
    /// Full URL of the company lookup endpoint
    pub endpoint: String,
    /// API access key, sent as a bearer token
    pub api_key: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl KycConfig {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        KycConfig {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            timeout: DEFAULT_TIMEOUT,
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
    /// - KYC_API_URL (required)
    /// - KYC_API_KEY (required)
    /// - KYC_TIMEOUT_SECS (optional, default: 10)
    ///
    /// Returns `None` when the API is not configured.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("KYC_API_URL").ok().filter(|v| !v.is_empty())?;
        let api_key = std::env::var("KYC_API_KEY").ok().filter(|v| !v.is_empty())?;
        Some(KycConfig {
            endpoint,
            api_key,
            timeout: timeout_from_env("KYC_TIMEOUT_SECS"),
        })
    }
}

/// Client for the KYC verification API
pub struct KycClient {
    config: KycConfig,
    http_client: reqwest::Client,
}

impl KycClient {
    /// Create a new KYC client
    pub fn new(config: KycConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("simplysetup-cin-resolver/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(KycClient {
            config,
            http_client,
        })
    }

    /// Create client from environment variables, if configured
    pub fn from_env() -> Result<Option<Self>> {
        KycConfig::from_env().map(Self::new).transpose()
    }

    pub fn config(&self) -> &KycConfig {
        &self.config
    }
}

#[async_trait]
impl CompanySource for KycClient {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn lookup(&self, cin: &Cin, decoded: &DecodedCin) -> Result<Option<CompanyRecord>> {
        info!("Querying KYC API for {}", cin);

        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({ "id_number": cin.as_str() }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CinError::Http(format!(
                "KYC API returned {} for {}",
                status, cin
            )));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "KYC API answered");
        parse_kyc_response(&body, cin, decoded)
    }
}

#[derive(Debug, Deserialize)]
struct KycEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<KycCompany>,
}

#[derive(Debug, Deserialize)]
struct KycCompany {
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    company_status: Option<String>,
    #[serde(default)]
    date_of_incorporation: Option<String>,
    #[serde(default)]
    authorized_capital: Option<Value>,
    #[serde(default)]
    paid_up_capital: Option<Value>,
    #[serde(default)]
    registered_address: Option<String>,
    #[serde(default)]
    directors: Vec<KycDirector>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KycDirector {
    Named { name: String },
    Plain(String),
}

impl KycDirector {
    fn into_name(self) -> String {
        match self {
            KycDirector::Named { name } | KycDirector::Plain(name) => name,
        }
    }
}

/// Capital figures arrive as either numbers or strings.
fn capital_to_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Map a KYC API body onto a record.
///
/// `Ok(None)` when the API reports failure or omits the company name.
pub fn parse_kyc_response(
    body: &str,
    cin: &Cin,
    decoded: &DecodedCin,
) -> Result<Option<CompanyRecord>> {
    let envelope: KycEnvelope = serde_json::from_str(body)?;

    let Some(company) = envelope.data.filter(|_| envelope.success) else {
        return Ok(None);
    };

    let Some(name) = company
        .company_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
    else {
        return Ok(None);
    };

    Ok(Some(CompanyRecord {
        cin: cin.to_string(),
        company_name: Some(name),
        status: company
            .company_status
            .unwrap_or_else(|| "Unknown".to_string()),
        registration_date: company
            .date_of_incorporation
            .as_deref()
            .and_then(normalize_date)
            .unwrap_or_else(|| decoded.registration_date_guess()),
        address: company.registered_address.unwrap_or_default(),
        state: decoded.state.clone(),
        country: COUNTRY.to_string(),
        directors: company
            .directors
            .into_iter()
            .map(KycDirector::into_name)
            .collect(),
        authorized_capital: capital_to_string(company.authorized_capital),
        paid_up_capital: capital_to_string(company.paid_up_capital),
        source: ResolutionSource::KycApi,
    }))
}
