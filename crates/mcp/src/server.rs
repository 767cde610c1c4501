//! Server side: serve a registry over stdio.
//!
//! Framing matches the client: one JSON-RPC message per line, requests on
//! stdin, responses on stdout. Logs must go to stderr only, since stdout
//! is the protocol channel.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::error::{Error, ToolError};
use crate::protocol::{
    CallToolParams, IncomingMessage, InitializeResult, JsonRpcError, JsonRpcResponse,
    ListToolsResult, RequestId, ServerCapabilities, ServerInfo, ToolsCapability, PROTOCOL_VERSION,
};
use crate::registry::Registry;

/// A tool server bound to a fixed registry.
pub struct Server {
    info: ServerInfo,
    registry: Arc<Registry>,
}

impl Server {
    pub fn new(name: impl Into<String>, version: impl Into<String>, registry: Registry) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: Some(version.into()),
            },
            registry: Arc::new(registry),
        }
    }

    /// Read requests from stdin and answer them on stdout until EOF.
    ///
    /// Requests are answered in arrival order so the peer can match
    /// responses by reading sequentially; the registry itself is safe for
    /// concurrent callers.
    pub async fn serve_stdio(&self) -> Result<(), Error> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        tracing::info!(server = %self.info.name, "serving on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            stdout.write_all(response_json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw input line. Returns `None` for notifications.
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let message: IncomingMessage = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(err) => {
                tracing::warn!(error = %err, "unparseable request");
                return Some(JsonRpcResponse::failure(
                    RequestId::Null,
                    JsonRpcError::new(JsonRpcError::PARSE_ERROR, format!("parse error: {err}")),
                ));
            }
        };

        match message.id {
            Some(id) => Some(self.dispatch(id, &message.method, message.params).await),
            None => {
                tracing::debug!(method = %message.method, "notification received");
                None
            }
        }
    }

    async fn dispatch(
        &self,
        id: RequestId,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> JsonRpcResponse {
        match method {
            "initialize" => JsonRpcResponse::success(
                id,
                InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability::default()),
                    },
                    server_info: self.info.clone(),
                },
            ),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list(),
                },
            ),
            "tools/call" => self.call_tool(id, params).await,
            other => JsonRpcResponse::failure(
                id,
                JsonRpcError::new(
                    JsonRpcError::METHOD_NOT_FOUND,
                    format!("unknown method: {other}"),
                ),
            ),
        }
    }

    async fn call_tool(&self, id: RequestId, params: Option<serde_json::Value>) -> JsonRpcResponse {
        let Some(value) = params else {
            return JsonRpcResponse::failure(
                id,
                JsonRpcError::new(JsonRpcError::INVALID_PARAMS, "missing call params"),
            );
        };

        let params: CallToolParams = match serde_json::from_value(value) {
            Ok(params) => params,
            Err(err) => {
                return JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(
                        JsonRpcError::INVALID_PARAMS,
                        format!("malformed call params: {err}"),
                    ),
                );
            }
        };

        let arguments = params.arguments.unwrap_or(serde_json::json!({}));

        match self.registry.call(&params.name, arguments).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            // Resolution and validation failures are protocol errors;
            // handler failures travel as is_error results so the cause
            // text reaches the caller intact.
            Err(err @ (ToolError::Unknown(_) | ToolError::InvalidParams(_))) => {
                JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(JsonRpcError::INVALID_PARAMS, err.to_string()),
                )
            }
            Err(err @ ToolError::Execution(_)) => {
                tracing::warn!(tool = %params.name, error = %err, "tool execution failed");
                JsonRpcResponse::success(id, crate::protocol::CallToolResult::error_text(
                    err.to_string(),
                ))
            }
        }
    }
}
