//! Server side: the tool table.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolDescriptor};

const MAX_SCHEMA_ERRORS: usize = 3;

/// A named operation the server exposes.
///
/// Implementations must be safe to call concurrently; the registry hands
/// out shared references only.
pub trait Tool: Send + Sync {
    /// The descriptor advertised via `tools/list`, including the parameter
    /// schema arguments are validated against before every call.
    fn descriptor(&self) -> ToolDescriptor;

    /// Run the tool against already-validated arguments.
    fn call(
        &self,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send + '_>>;
}

/// Immutable name → tool table, populated once before serving.
///
/// There is no runtime registration or deregistration; after
/// [`Registry::register`] calls finish the table is only ever read.
#[derive(Default)]
pub struct Registry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. Later registrations under the same name replace earlier
    /// ones.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.descriptor().name;
        self.tools.insert(name, Arc::new(tool));
    }

    /// All advertised descriptors.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<_> = self.tools.values().map(|t| t.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Resolve a tool, validate the arguments against its declared schema,
    /// and run it.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<CallToolResult, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;

        let descriptor = tool.descriptor();
        validate_arguments(&descriptor.input_schema, &arguments)?;

        tracing::debug!(tool = %name, "dispatching tool call");
        tool.call(arguments).await
    }
}

/// Check `arguments` against a tool's declared parameter schema.
///
/// Diagnostics are capped; the instance path of each violation is kept so
/// the caller can see which field failed.
fn validate_arguments(schema: &Value, arguments: &Value) -> Result<(), ToolError> {
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|err| ToolError::InvalidParams(format!("unusable parameter schema: {err}")))?;

    if let Err(errors) = compiled.validate(arguments) {
        let mut details = Vec::new();
        for (idx, error) in errors.enumerate() {
            if idx >= MAX_SCHEMA_ERRORS {
                details.push("additional errors truncated".to_string());
                break;
            }
            let mut path = error.instance_path.to_string();
            if path.is_empty() {
                path = "<root>".to_string();
            }
            details.push(format!("{path}: {error}"));
        }
        return Err(ToolError::InvalidParams(details.join("; ")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    impl Tool for EchoTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: "echo".to_string(),
                title: None,
                description: Some("echoes the message back".to_string()),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "message": {"type": "string", "minLength": 1}
                    },
                    "required": ["message"]
                }),
            }
        }

        fn call(
            &self,
            arguments: Value,
        ) -> Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send + '_>> {
            Box::pin(async move {
                let message = arguments["message"].as_str().unwrap_or_default();
                Ok(CallToolResult::text(message))
            })
        }
    }

    struct FailingTool;

    impl Tool for FailingTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor {
                name: "broken".to_string(),
                title: None,
                description: None,
                input_schema: json!({"type": "object"}),
            }
        }

        fn call(
            &self,
            _arguments: Value,
        ) -> Pin<Box<dyn Future<Output = Result<CallToolResult, ToolError>> + Send + '_>> {
            Box::pin(async { Err(ToolError::Execution("upstream unavailable".to_string())) })
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(EchoTool);
        registry.register(FailingTool);
        registry
    }

    #[tokio::test]
    async fn dispatches_registered_tool() {
        let result = registry()
            .call("echo", json!({"message": "merhaba"}))
            .await
            .unwrap();
        assert_eq!(result.content[0].as_text(), Some("merhaba"));
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let err = registry().call("missing", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Unknown(name) if name == "missing"));
    }

    #[tokio::test]
    async fn arguments_are_validated_before_dispatch() {
        let err = registry().call("echo", json!({})).await.unwrap_err();
        let ToolError::InvalidParams(details) = err else {
            panic!("expected invalid params");
        };
        assert!(details.contains("message"));
    }

    #[tokio::test]
    async fn handler_failures_carry_the_cause() {
        let err = registry().call("broken", json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Execution(cause) if cause.contains("unavailable")));
    }

    #[test]
    fn listing_is_sorted_by_name() {
        let names: Vec<_> = registry().list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["broken".to_string(), "echo".to_string()]);
    }
}
