//! Request/response protocol between the weather client and its tool
//! server, plus both endpoints of it.
//!
//! The wire format is JSON-RPC 2.0, one message per line, spoken over the
//! stdio pipes of a spawned child process. The client half
//! ([`Connection`]) spawns the server, performs the `initialize`
//! handshake, and forwards tool invocations; the server half ([`Server`])
//! answers `tools/list` and `tools/call` out of an immutable [`Registry`]
//! of schema-described tools.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{Connection, ServerConfig};
//!
//! # async fn example() -> mcp::Result<()> {
//! let config = ServerConfig::new("poyraz-server");
//! let connection = Connection::spawn(config, "poyraz", "0.1.0").await?;
//! connection.initialize().await?;
//!
//! for tool in connection.tools().await {
//!     println!("Tool: {}", tool.name);
//! }
//!
//! let result = connection
//!     .call_tool("health_check", Some(serde_json::json!({})))
//!     .await?;
//! # let _ = result;
//!
//! connection.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod protocol;
mod registry;
mod server;

pub use client::{Connection, ServerConfig, DEFAULT_TIMEOUT};
pub use error::{Error, Result, ToolError};
pub use protocol::{
    CallToolParams, CallToolResult, IncomingMessage, InitializeParams, InitializeResult,
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, RequestId, ServerCapabilities,
    ServerInfo, ToolContent, ToolDescriptor, PROTOCOL_VERSION,
};
pub use registry::{Registry, Tool};
pub use server::Server;
