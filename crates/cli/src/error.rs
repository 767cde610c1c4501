//! CLI error types.

use thiserror::Error;

/// Driver errors: everything the pipeline can raise, plus local
/// configuration and terminal I/O failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is invalid or missing required fields.
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A pipeline stage failed.
    #[error(transparent)]
    Runtime(#[from] runtime::Error),

    /// A terminal I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
