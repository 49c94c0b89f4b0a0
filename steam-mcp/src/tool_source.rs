//! Tool-facing types: specs as advertised over MCP `tools/list`, call results and errors.

use serde::Serialize;
use thiserror::Error;

use crate::error::SteamError;

/// Name, description and JSON schema of a tool (aligned with the MCP `tools/list` entry).
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Text returned by a tool call.
#[derive(Debug, Clone)]
pub struct ToolCallContent {
    pub text: String,
}

impl ToolCallContent {
    /// Pretty-printed JSON of `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolSourceError> {
        Ok(Self {
            text: serde_json::to_string_pretty(value)?,
        })
    }
}

/// Failure of a tool call as seen by the protocol layer.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    /// Arguments missing, of the wrong type, or failing validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No tool registered under this name.
    #[error("tool not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Steam(#[from] SteamError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}
