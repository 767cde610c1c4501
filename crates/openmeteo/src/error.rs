//! Provider adapter errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("provider request failed: {0}")]
    Network(String),

    #[error("provider returned status {0}")]
    Unavailable(reqwest::StatusCode),

    #[error("provider response did not match the expected shape: {0}")]
    SchemaMismatch(String),

    #[error("no geocoding match for \"{0}\"")]
    NotFound(String),

    #[error("invalid daily record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;
