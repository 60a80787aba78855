//! Error types for the catalog
//!
//! Only the collaborators at the edge (storage, configuration) can fail.
//! Filtering, facet counting, sorting, URL decoding and pagination resolve
//! malformed input to a safe default instead of raising.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::InvalidData(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
