//! Error types for cin-resolver

use thiserror::Error;

/// Errors that can occur while validating or resolving a CIN
#[derive(Error, Debug)]
pub enum CinError {
    /// Input is not 21 characters long
    #[error("CIN must be 21 characters, got {length}: {input:?}")]
    InvalidLength { input: String, length: usize },

    /// A character does not fit its fixed-width field
    #[error("Invalid CIN {input:?}: character {position} must be {expected}")]
    InvalidCharacter {
        input: String,
        position: usize,
        expected: &'static str,
    },

    /// Source is not configured (missing endpoint or key)
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// HTTP transport or status error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Upstream answered with something we cannot read
    #[error("Unexpected response from {source_name}: {reason}")]
    UnexpectedResponse {
        source_name: &'static str,
        reason: String,
    },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CinError {
    fn from(err: reqwest::Error) -> Self {
        CinError::Http(err.to_string())
    }
}

impl CinError {
    /// Only malformed input is surfaced to resolver callers.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CinError::InvalidLength { .. } | CinError::InvalidCharacter { .. }
        )
    }
}
