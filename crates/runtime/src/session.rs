//! Per-client wiring of the question pipeline.

use mcp::{CallToolResult, Connection, ServerConfig, ToolDescriptor};

use crate::error::Result;
use crate::llm::Client;
use crate::selector;
use crate::synthesizer;

const CLIENT_NAME: &str = "poyraz";

/// A session owns the completion client and the spawned tool-server
/// connection, and runs one question at a time through selection,
/// invocation, and synthesis. No state carries over between questions.
pub struct Session {
    llm: Client,
    connection: Connection,
}

impl Session {
    /// Spawn the tool server and perform the handshake.
    pub async fn connect(llm: Client, server: ServerConfig) -> Result<Self> {
        let connection = Connection::spawn(server, CLIENT_NAME, env!("CARGO_PKG_VERSION")).await?;
        connection.initialize().await?;
        Ok(Self { llm, connection })
    }

    /// The tool catalog advertised by the server.
    pub async fn tools(&self) -> Vec<ToolDescriptor> {
        self.connection.tools().await
    }

    /// Answer one question: select a tool, invoke it, synthesize prose.
    ///
    /// Each stage hands off strictly to the next; any failure aborts the
    /// question and propagates with its stage's typed error.
    pub async fn ask(&self, question: &str) -> Result<String> {
        tracing::info!(question, "processing question");

        let tools = self.connection.tools().await;
        let invocation = selector::select_tool(&self.llm, &tools, question).await?;

        let result = self.invoke(&invocation.tool_name, invocation.parameters).await?;

        let answer = synthesizer::synthesize(&self.llm, question, &result).await?;
        Ok(answer)
    }

    async fn invoke(&self, tool_name: &str, parameters: serde_json::Value) -> Result<CallToolResult> {
        tracing::info!(tool = %tool_name, "invoking tool");
        let result = self.connection.call_tool(tool_name, Some(parameters)).await?;
        Ok(result)
    }

    /// Release the connection and terminate the server process.
    pub async fn shutdown(self) -> Result<()> {
        self.connection.shutdown().await?;
        Ok(())
    }
}
