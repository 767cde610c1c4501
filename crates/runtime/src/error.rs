//! Pipeline error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("model returned no content")]
    ResponseEmpty,

    #[error("model response is not valid JSON: {0}")]
    ResponseNotJson(String),

    #[error("tool parameters failed schema validation: {0}")]
    SchemaValidation(String),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] mcp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
