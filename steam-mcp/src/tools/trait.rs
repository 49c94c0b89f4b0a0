use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// A single tool callable over MCP.
///
/// Each tool has a unique name, a spec (description and JSON schema)
/// and the call logic. Tools are registered with [`ToolRegistry`](super::ToolRegistry),
/// which the MCP server dispatches `tools/call` requests through.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use steam_mcp::tools::Tool;
/// use steam_mcp::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
///
/// struct Ping;
///
/// #[async_trait]
/// impl Tool for Ping {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "ping".to_string(),
///             description: Some("Replies pong".to_string()),
///             input_schema: serde_json::json!({ "type": "object" }),
///         }
///     }
///
///     async fn call(&self, _args: Value) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent { text: "pong".to_string() })
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Description and input schema advertised in `tools/list`.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool.
    ///
    /// # Errors
    ///
    /// - [`ToolSourceError::InvalidInput`] when arguments are missing or malformed
    /// - [`ToolSourceError::Steam`] when a top-level remote call fails
    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError>;
}
