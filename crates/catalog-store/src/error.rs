//! Error types for catalog-store

use thiserror::Error;

use crate::storage_traits::Collection;

/// Errors that can occur in the catalog persistence layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database connection error
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// No database is configured in the environment
    #[error("Database not configured: {0}")]
    NotConfigured(String),

    /// Database query error
    #[error("Database query failed: {0}")]
    Query(String),

    /// Serialization error
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Schema setup error
    #[error("Schema setup failed: {0}")]
    SchemaSetup(String),

    /// A collection could not be read at all
    #[error("Collection {collection} is unavailable: {reason}")]
    Unavailable {
        collection: Collection,
        reason: String,
    },

    /// Seed data referenced a row that does not exist
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
