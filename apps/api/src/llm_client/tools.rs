//! Tool grants for tool-augmented reasoning calls.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid tool input: {0}")]
    InvalidInput(String),

    #[error("tool backend failed: {0}")]
    Backend(String),
}

/// A capability the model may invoke during `complete_with_tools`.
#[async_trait]
pub trait AgentTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// JSON Schema describing the tool's input object.
    fn input_schema(&self) -> Value;
    async fn call(&self, input: Value) -> Result<String, ToolError>;
}

/// Tool definition as sent to the Messages API.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireTool {
    name: String,
    description: String,
    input_schema: Value,
}

impl From<&dyn AgentTool> for WireTool {
    fn from(tool: &dyn AgentTool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        }
    }
}

pub(crate) fn find_tool<'a>(
    tools: &'a [Arc<dyn AgentTool>],
    name: &str,
) -> Option<&'a Arc<dyn AgentTool>> {
    tools.iter().find(|t| t.name() == name)
}
