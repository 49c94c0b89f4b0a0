//! MCP server: newline-delimited JSON-RPC 2.0 over any async reader/writer.
//!
//! Handles `initialize`, `notifications/*`, `ping`, `tools/list` and `tools/call`.
//! Tool failures come back as `tools/call` results with `isError: true`; only
//! protocol problems (bad JSON, unknown method, malformed params) are JSON-RPC errors.
//! Stdout carries protocol messages only, so logging must go elsewhere.

mod protocol;

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::sanitize_message;
use crate::tool_source::ToolSourceError;
use crate::tools::ToolRegistry;

pub use protocol::{ErrorObject, JsonRpcRequest, JsonRpcResponse};

/// MCP protocol revision announced in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

const MAX_ERROR_CHARS: usize = 500;

/// Serves a [`ToolRegistry`] over MCP.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    name: String,
    version: String,
    secret: Option<Arc<str>>,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            secret: None,
        }
    }

    /// Overrides the `serverInfo` announced in `initialize`.
    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.name = name.into();
        self.version = version.into();
        self
    }

    /// Redacts `secret` from every error message sent to the client.
    pub fn with_secret(mut self, secret: impl Into<Arc<str>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Reads requests line by line until EOF, writing one response line per request.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(tools = self.registry.len(), "MCP server started");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(line).await {
                let mut bytes = serde_json::to_vec(&response)?;
                bytes.push(b'\n');
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
        }
        tracing::info!("MCP client closed the stream");
        Ok(())
    }

    /// Handles one raw message. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "unparseable message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        };
        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "notification");
            return None;
        };
        let params = request.params.unwrap_or_else(|| json!({}));
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": self.registry.list() })),
            "tools/call" => self.tools_call(id, params).await,
            other => {
                tracing::debug!(method = other, "unknown method");
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
            }
        };
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": { "name": self.name, "version": self.version }
        })
    }

    async fn tools_call(&self, id: Value, params: Value) -> JsonRpcResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, "tools/call requires 'name'");
        };
        let args = match params.get("arguments") {
            None | Some(Value::Null) => json!({}),
            Some(v @ Value::Object(_)) => v.clone(),
            Some(_) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, "'arguments' must be an object")
            }
        };
        if self.registry.get(name).is_none() {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Unknown tool: {}", name));
        }

        match self.registry.call(name, args).await {
            Ok(content) => JsonRpcResponse::success(id, tool_result(content.text, false)),
            Err(e) => {
                match &e {
                    ToolSourceError::InvalidInput(_) => {
                        tracing::debug!(tool = name, error = %e, "tool rejected input")
                    }
                    _ => tracing::warn!(tool = name, error = %e, "tool call failed"),
                }
                let message =
                    sanitize_message(&e.to_string(), self.secret.as_deref().unwrap_or(""), MAX_ERROR_CHARS);
                JsonRpcResponse::success(id, tool_result(message, true))
            }
        }
    }
}

fn tool_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool_source::{ToolCallContent, ToolSpec};
    use crate::tools::Tool;
    use async_trait::async_trait;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "echo".into(),
                description: Some("Echo arguments".into()),
                input_schema: json!({ "type": "object" }),
            }
        }

        async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
            if args.get("fail").is_some() {
                return Err(ToolSourceError::InvalidInput("key=sekrit rejected".into()));
            }
            ToolCallContent::json(&args)
        }
    }

    fn server() -> McpServer {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        McpServer::new(Arc::new(registry)).with_secret("sekrit")
    }

    async fn roundtrip(server: &McpServer, line: &str) -> Value {
        let response = server.handle_message(line).await.expect("response");
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn initialize_announces_tools_capability() {
        let v = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        )
        .await;
        assert_eq!(v["id"], 1);
        assert_eq!(v["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert!(v["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let s = server();
        assert!(s
            .handle_message(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn protocol_errors_use_jsonrpc_codes() {
        let s = server();
        let v = roundtrip(&s, "{not json").await;
        assert_eq!(v["error"]["code"], PARSE_ERROR);
        assert_eq!(v["id"], Value::Null);

        let v = roundtrip(&s, r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#).await;
        assert_eq!(v["error"]["code"], METHOD_NOT_FOUND);
        assert_eq!(v["id"], "a");

        let v = roundtrip(
            &s,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await;
        assert_eq!(v["error"]["code"], INVALID_PARAMS);

        let v = roundtrip(
            &s,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope"}}"#,
        )
        .await;
        assert_eq!(v["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn tool_failure_is_an_error_result_with_secret_redacted() {
        let v = roundtrip(
            &server(),
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"echo","arguments":{"fail":true}}}"#,
        )
        .await;
        assert!(v.get("error").is_none());
        assert_eq!(v["result"]["isError"], true);
        let text = v["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("***"));
        assert!(!text.contains("sekrit"));
    }

    #[tokio::test]
    async fn serve_writes_one_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut out = Vec::new();
        server().serve(input.as_bytes(), &mut out).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["result"]["tools"][0]["name"], "echo");
        assert_eq!(lines[1]["result"]["tools"][0]["inputSchema"]["type"], "object");
    }
}
