use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cin::{Cin, DecodedCin};
use crate::tables::COUNTRY;

/// Which source produced a [`CompanyRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    KnownTable,
    KycApi,
    RegistryPortal,
    Unresolved,
}

/// Best available company metadata for a CIN.
///
/// `company_name` is `None` when no authoritative source confirmed a name and
/// serializes as `null`, never as an empty or placeholder string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub cin: String,
    pub company_name: Option<String>,
    pub status: String,
    pub registration_date: String,
    pub address: String,
    pub state: String,
    pub country: String,
    pub directors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorized_capital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_up_capital: Option<String>,
    pub source: ResolutionSource,
}

impl CompanyRecord {
    /// Record carrying only what the CIN itself tells us.
    pub fn unresolved(cin: &Cin, decoded: &DecodedCin) -> Self {
        CompanyRecord {
            cin: cin.to_string(),
            company_name: None,
            status: "Unverified".to_string(),
            registration_date: decoded.registration_date_guess(),
            address: String::new(),
            state: decoded.state.clone(),
            country: COUNTRY.to_string(),
            directors: Vec::new(),
            authorized_capital: None,
            paid_up_capital: None,
            source: ResolutionSource::Unresolved,
        }
    }

    /// Record for a CIN found in the known-company table.
    pub fn known(cin: &Cin, decoded: &DecodedCin, name: &str) -> Self {
        CompanyRecord {
            company_name: Some(name.to_string()),
            status: "Active".to_string(),
            address: format!("{}, {}", decoded.state, COUNTRY),
            source: ResolutionSource::KnownTable,
            ..Self::unresolved(cin, decoded)
        }
    }

    /// Whether this record names the company.
    pub fn is_resolved(&self) -> bool {
        self.company_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}

/// Accepted incorporation-date layouts, ISO first.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d-%b-%Y"];

/// Normalize a source-supplied date to `YYYY-MM-DD`. `None` if unrecognised.
pub(crate) fn normalize_date(raw: &str) -> Option<String> {
    let day = raw.split_whitespace().next().unwrap_or_default();
    // KYC payloads sometimes carry an ISO time component
    let day = match day.split_once('T') {
        Some((date, _)) if date.len() == 10 => date,
        _ => day,
    };
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_serializes_null_name() {
        let cin = Cin::parse("U72900PN2022PTC211370").unwrap();
        let record = CompanyRecord::unresolved(&cin, &cin.decode());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["companyName"].is_null());
        assert_eq!(json["state"], "Maharashtra");
        assert_eq!(json["registrationDate"], "2022-01-01");
        assert_eq!(json["source"], "unresolved");
        assert!(json.get("authorizedCapital").is_none());
    }

    #[test]
    fn test_blank_name_is_not_resolved() {
        let cin = Cin::parse("U72900PN2022PTC211370").unwrap();
        let mut record = CompanyRecord::known(&cin, &cin.decode(), "Techlify");
        assert!(record.is_resolved());

        record.company_name = Some("   ".to_string());
        assert!(!record.is_resolved());
    }

    #[test]
    fn test_normalize_date_layouts() {
        assert_eq!(normalize_date("14/06/2022").as_deref(), Some("2022-06-14"));
        assert_eq!(normalize_date("14-06-2022").as_deref(), Some("2022-06-14"));
        assert_eq!(normalize_date("2022-06-14").as_deref(), Some("2022-06-14"));
        assert_eq!(normalize_date("2022-06-14T00:00:00Z").as_deref(), Some("2022-06-14"));
        assert_eq!(normalize_date("14-Jun-2022").as_deref(), Some("2022-06-14"));
        assert_eq!(normalize_date("14-OCT-2022").as_deref(), Some("2022-10-14"));
        assert_eq!(normalize_date("31/02/2022"), None);
        assert_eq!(normalize_date("soon"), None);
    }
}
