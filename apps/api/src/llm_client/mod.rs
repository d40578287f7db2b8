/// LLM Client: the single point of entry for all reasoning-service calls in JobScout.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Pipelines depend on the `ReasoningService` trait; `LlmClient` is the production
/// implementation and `scripted::ScriptedReasoner` stands in for it in tests.
///
/// Model: claude-sonnet-4-5 (hardcoded, not configurable)
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
#[cfg(test)]
pub mod scripted;
pub mod tools;

pub use tools::{AgentTool, ToolError};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in JobScout.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Upper bound on model-tool round trips inside one tool-augmented call.
pub const MAX_TOOL_ROUNDS: usize = 6;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Tool loop did not produce a final answer within {rounds} rounds")]
    ToolLoopExhausted { rounds: usize },
}

// ────────────────────────────────────────────────────────────────────────────
// Caller-facing message model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One piece of a message. At most one image is expected per request.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePart {
    Text(String),
    /// Base64-encoded raster image with its MIME type (e.g. `image/png`).
    Image { media_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    /// A user turn carrying an inline image followed by an instruction.
    pub fn user_with_image(
        text: impl Into<String>,
        media_type: impl Into<String>,
        base64_data: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::User,
            parts: vec![
                MessagePart::Image {
                    media_type: media_type.into(),
                    data: base64_data.into(),
                },
                MessagePart::Text(text.into()),
            ],
        }
    }

    /// Concatenated text parts. Images are skipped.
    #[cfg(test)]
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                MessagePart::Text(t) => Some(t.as_str()),
                MessagePart::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One tool invocation made by the model during a tool-augmented call.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallRecord {
    pub tool: String,
    pub input: Value,
    pub output: String,
    pub is_error: bool,
}

/// Final answer of a tool-augmented call plus the transcript of tool invocations.
#[derive(Debug, Clone, Serialize)]
pub struct AgentOutput {
    pub output: String,
    pub tool_calls: Vec<ToolCallRecord>,
}

/// The reasoning-service boundary. Everything that talks to a model goes through this.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Plain completion: returns the model's text answer.
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<String, LlmError>;

    /// Completion with tool access. The model may call any of `tools` zero or more
    /// times before answering; the loop is bounded by `MAX_TOOL_ROUNDS`.
    async fn complete_with_tools(
        &self,
        system: &str,
        tools: &[Arc<dyn AgentTool>],
        user_message: &str,
        history: &[Message],
    ) -> Result<AgentOutput, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [WireMessage],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    tools: &'a [tools::WireTool],
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct WireMessage {
    role: Role,
    content: Vec<ContentBlock>,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let content = message
            .parts
            .iter()
            .map(|part| match part {
                MessagePart::Text(text) => ContentBlock::Text { text: text.clone() },
                MessagePart::Image { media_type, data } => ContentBlock::Image {
                    source: ImageSource {
                        kind: "base64".to_string(),
                        media_type: media_type.clone(),
                        data: data.clone(),
                    },
                },
            })
            .collect();
        Self {
            role: message.role,
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        source: ImageSource,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
    /// Block types we neither send nor consume (e.g. thinking).
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub media_type: String,
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Joins every text block of the response.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn tool_uses(&self) -> Vec<(String, String, Value)> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some((id.clone(), name.clone(), input.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Production client
// ────────────────────────────────────────────────────────────────────────────

/// The production reasoning service. Wraps the Anthropic Messages API with
/// transport-level retry and the tool-use loop.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
        })
    }

    /// Makes a raw call to the Messages API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn call(
        &self,
        system: &str,
        messages: &[WireMessage],
        tools: &[tools::WireTool],
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages,
            tools,
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}, stop_reason={:?}",
                llm_response.usage.input_tokens,
                llm_response.usage.output_tokens,
                llm_response.stop_reason
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Delay before retry `attempt` (1-based): 1s, then 2s. Three attempts sleep twice.
fn backoff_delay(attempt: u32) -> std::time::Duration {
    std::time::Duration::from_millis(1000 * (1 << attempt.saturating_sub(1)))
}

#[async_trait]
impl ReasoningService for LlmClient {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<String, LlmError> {
        let wire: Vec<WireMessage> = messages.iter().map(WireMessage::from).collect();
        let response = self.call(system, &wire, &[]).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }

    async fn complete_with_tools(
        &self,
        system: &str,
        tools: &[Arc<dyn AgentTool>],
        user_message: &str,
        history: &[Message],
    ) -> Result<AgentOutput, LlmError> {
        let wire_tools: Vec<tools::WireTool> = tools
            .iter()
            .map(|t| tools::WireTool::from(t.as_ref()))
            .collect();

        let mut conversation: Vec<WireMessage> =
            history.iter().map(WireMessage::from).collect();
        conversation.push(WireMessage::from(&Message::user(user_message)));

        run_tool_loop(
            |messages| {
                let wire_tools = &wire_tools;
                async move { self.call(system, &messages, wire_tools).await }
            },
            tools,
            conversation,
        )
        .await
    }
}

/// Drives the model and tool exchange until the model answers without requesting a tool.
///
/// Tool failures (unknown tool, tool error) are fed back to the model as error
/// results rather than aborting the call.
pub(crate) async fn run_tool_loop<F, Fut>(
    mut send: F,
    tools: &[Arc<dyn AgentTool>],
    mut conversation: Vec<WireMessage>,
) -> Result<AgentOutput, LlmError>
where
    F: FnMut(Vec<WireMessage>) -> Fut,
    Fut: Future<Output = Result<LlmResponse, LlmError>>,
{
    let mut tool_calls = Vec::new();

    for round in 0..MAX_TOOL_ROUNDS {
        let response = send(conversation.clone()).await?;
        let requested = response.tool_uses();

        if requested.is_empty() {
            let output = response.text();
            if output.trim().is_empty() {
                return Err(LlmError::EmptyContent);
            }
            debug!(
                "Tool loop finished after {} round(s), {} tool call(s)",
                round + 1,
                tool_calls.len()
            );
            return Ok(AgentOutput { output, tool_calls });
        }

        // Echo the assistant turn back verbatim so tool_use ids stay resolvable.
        let assistant_blocks: Vec<ContentBlock> = response
            .content
            .into_iter()
            .filter(|b| matches!(b, ContentBlock::Text { .. } | ContentBlock::ToolUse { .. }))
            .collect();
        conversation.push(WireMessage {
            role: Role::Assistant,
            content: assistant_blocks,
        });

        let mut results = Vec::with_capacity(requested.len());
        for (id, name, input) in requested {
            let (content, is_error) = match tools::find_tool(tools, &name) {
                Some(tool) => match tool.call(input.clone()).await {
                    Ok(output) => (output, false),
                    Err(e) => {
                        warn!("Tool '{name}' failed: {e}");
                        (e.to_string(), true)
                    }
                },
                None => {
                    warn!("Model requested unknown tool '{name}'");
                    (format!("Unknown tool: {name}"), true)
                }
            };
            tool_calls.push(ToolCallRecord {
                tool: name,
                input,
                output: content.clone(),
                is_error,
            });
            results.push(ContentBlock::ToolResult {
                tool_use_id: id,
                content,
                is_error,
            });
        }
        conversation.push(WireMessage {
            role: Role::User,
            content: results,
        });
    }

    Err(LlmError::ToolLoopExhausted {
        rounds: MAX_TOOL_ROUNDS,
    })
}
