//! Protocol error types.

use crate::protocol::JsonRpcError;
use thiserror::Error;

/// Client-side (transport) errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("transport i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("server not initialized")]
    NotInitialized,

    #[error("server exited unexpectedly")]
    ServerExited,

    #[error("timeout waiting for response")]
    Timeout,

    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON-RPC error: {0}")]
    JsonRpc(#[from] JsonRpcError),

    #[error("tool call failed: {0}")]
    ToolCallFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Host-side errors raised while resolving and running a registered tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    Unknown(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("tool execution failed: {0}")]
    Execution(String),
}
