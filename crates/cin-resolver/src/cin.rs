//! CIN validation and fixed-width field decoding
//!
//! Layout of a CIN such as `U72900PN2022PTC211370`:
//!
//! | offset | len | field               | example |
//! |--------|-----|---------------------|---------|
//! | 0      | 1   | listing status      | `U`     |
//! | 1      | 5   | industry code       | `72900` |
//! | 6      | 2   | state code          | `PN`    |
//! | 8      | 4   | incorporation year  | `2022`  |
//! | 12     | 3   | entity type code    | `PTC`   |
//! | 15     | 6   | registration number | `211370`|

use serde::{Deserialize, Serialize};

use crate::error::CinError;
use crate::tables;

pub const CIN_LENGTH: usize = 21;

#[derive(Clone, Copy)]
enum Class {
    Listing,
    Digit,
    Letter,
}

const LAYOUT: [(std::ops::Range<usize>, Class); 6] = [
    (0..1, Class::Listing),
    (1..6, Class::Digit),
    (6..8, Class::Letter),
    (8..12, Class::Digit),
    (12..15, Class::Letter),
    (15..21, Class::Digit),
];

/// A validated, upper-cased Corporate Identification Number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cin(String);

impl Cin {
    /// Validate `input` (surrounding whitespace ignored, case-insensitive).
    pub fn parse(input: &str) -> Result<Self, CinError> {
        let normalized = input.trim().to_ascii_uppercase();

        if normalized.len() != CIN_LENGTH || !normalized.is_ascii() {
            return Err(CinError::InvalidLength {
                input: input.to_string(),
                length: normalized.chars().count(),
            });
        }

        let bytes = normalized.as_bytes();
        for (range, class) in LAYOUT {
            for position in range {
                let b = bytes[position];
                let (ok, expected) = match class {
                    Class::Listing => (b == b'L' || b == b'U', "'L' or 'U'"),
                    Class::Digit => (b.is_ascii_digit(), "a digit"),
                    Class::Letter => (b.is_ascii_uppercase(), "a letter"),
                };
                if !ok {
                    return Err(CinError::InvalidCharacter {
                        input: input.to_string(),
                        position,
                        expected,
                    });
                }
            }
        }

        Ok(Cin(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn field(&self, range: std::ops::Range<usize>) -> &str {
        &self.0[range]
    }

    pub fn listing_code(&self) -> char {
        // Validated ASCII, so the first byte is the first char.
        self.0.as_bytes()[0] as char
    }

    pub fn industry_code(&self) -> &str {
        self.field(1..6)
    }

    pub fn state_code(&self) -> &str {
        self.field(6..8)
    }

    pub fn year_code(&self) -> &str {
        self.field(8..12)
    }

    pub fn entity_type_code(&self) -> &str {
        self.field(12..15)
    }

    pub fn registration_number(&self) -> &str {
        self.field(15..21)
    }

    /// Decode every field into human-readable metadata. Pure; never fails.
    pub fn decode(&self) -> DecodedCin {
        let listing_status = if self.listing_code() == 'L' {
            ListingStatus::Listed
        } else {
            ListingStatus::Unlisted
        };

        DecodedCin {
            listing_status,
            industry_code: self.industry_code().to_string(),
            industry: tables::industry_name(self.industry_code()).to_string(),
            state_code: self.state_code().to_string(),
            state: tables::state_name(self.state_code()).to_string(),
            // Four validated digits always fit
            incorporation_year: self.year_code().parse().unwrap_or_default(),
            entity_type_code: self.entity_type_code().to_string(),
            entity_type: tables::entity_type_name(self.entity_type_code()).to_string(),
            registration_number: self.registration_number().to_string(),
        }
    }
}

impl TryFrom<String> for Cin {
    type Error = CinError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Cin::parse(&s)
    }
}

impl From<Cin> for String {
    fn from(cin: Cin) -> Self {
        cin.0
    }
}

impl std::str::FromStr for Cin {
    type Err = CinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cin::parse(s)
    }
}

impl std::fmt::Display for Cin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether the company is listed on a stock exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Listed,
    Unlisted,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Listed => write!(f, "Listed"),
            ListingStatus::Unlisted => write!(f, "Unlisted"),
        }
    }
}

/// Metadata inferred from the CIN alone. Unverified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedCin {
    pub listing_status: ListingStatus,
    pub industry_code: String,
    pub industry: String,
    pub state_code: String,
    pub state: String,
    pub incorporation_year: u16,
    pub entity_type_code: String,
    pub entity_type: String,
    pub registration_number: String,
}

impl DecodedCin {
    /// Best guess at the registration date: January 1st of the incorporation year.
    pub fn registration_date_guess(&self) -> String {
        format!("{:04}-01-01", self.incorporation_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TECHLIFY: &str = "U72900PN2022PTC211370";

    #[test]
    fn test_decode_reference_cin() {
        let decoded = Cin::parse(TECHLIFY).unwrap().decode();

        assert_eq!(decoded.state, "Maharashtra");
        assert_eq!(
            decoded.industry,
            "Computer programming, consultancy and related activities"
        );
        assert_eq!(decoded.incorporation_year, 2022);
        assert_eq!(decoded.listing_status, ListingStatus::Unlisted);
        assert_eq!(decoded.entity_type, "Private Limited Company");
        assert_eq!(decoded.registration_number, "211370");
        assert_eq!(decoded.registration_date_guess(), "2022-01-01");
    }

    #[test]
    fn test_decode_is_deterministic() {
        let cin = Cin::parse(TECHLIFY).unwrap();
        assert_eq!(cin.decode(), cin.decode());
        assert_eq!(cin.decode(), Cin::parse(TECHLIFY).unwrap().decode());
    }

    #[test]
    fn test_listed_public_company() {
        let decoded = Cin::parse("L17111MH1995PLC012345").unwrap().decode();
        assert_eq!(decoded.listing_status, ListingStatus::Listed);
        assert_eq!(decoded.entity_type, "Company");
        assert_eq!(decoded.industry, "Manufacture of textiles");
    }

    #[test]
    fn test_unmapped_codes_use_defaults() {
        let decoded = Cin::parse("U00001ZZ2010PTC000001").unwrap().decode();
        assert_eq!(decoded.industry, tables::DEFAULT_INDUSTRY);
        assert_eq!(decoded.state, tables::DEFAULT_STATE);
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let cin = Cin::parse("  u72900pn2022ptc211370\n").unwrap();
        assert_eq!(cin.as_str(), TECHLIFY);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = Cin::parse("U72900PN2022PTC21137").unwrap_err();
        assert!(matches!(err, CinError::InvalidLength { length: 20, .. }));

        let err = Cin::parse("").unwrap_err();
        assert!(matches!(err, CinError::InvalidLength { length: 0, .. }));
    }

    #[test]
    fn test_parse_rejects_misplaced_characters() {
        let err = Cin::parse("X72900PN2022PTC211370").unwrap_err();
        assert!(matches!(err, CinError::InvalidCharacter { position: 0, .. }));

        let err = Cin::parse("U72900P12022PTC211370").unwrap_err();
        assert!(matches!(err, CinError::InvalidCharacter { position: 7, .. }));

        let err = Cin::parse("U72900PN20X2PTC211370").unwrap_err();
        assert!(matches!(err, CinError::InvalidCharacter { position: 10, .. }));
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        let err = Cin::parse("U72900PN2022PTC21137é").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let cin: Cin = serde_json::from_str(&format!("\"{TECHLIFY}\"")).unwrap();
        assert_eq!(cin.as_str(), TECHLIFY);
        assert!(serde_json::from_str::<Cin>("\"not-a-cin\"").is_err());
    }
}
