//! Deterministic reasoning service for tests: replays queued replies in order and
//! records every prompt it was given.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{AgentOutput, AgentTool, LlmError, Message, ReasoningService};

pub struct ScriptedReasoner {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A reasoner whose first call fails with a transport error.
    pub fn failing() -> Self {
        let reasoner = Self::new(Vec::<String>::new());
        reasoner
            .replies
            .lock()
            .unwrap()
            .push_back(Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }));
        reasoner
    }

    pub fn shared<I, S>(replies: I) -> Arc<dyn ReasoningService>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self::new(replies))
    }

    /// Every user-visible prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_reply(&self, prompt: String) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

#[async_trait]
impl ReasoningService for ScriptedReasoner {
    async fn complete(&self, _system: &str, messages: &[Message]) -> Result<String, LlmError> {
        let prompt = messages
            .iter()
            .map(Message::text)
            .collect::<Vec<_>>()
            .join("\n");
        self.next_reply(prompt)
    }

    async fn complete_with_tools(
        &self,
        _system: &str,
        _tools: &[Arc<dyn AgentTool>],
        user_message: &str,
        _history: &[Message],
    ) -> Result<AgentOutput, LlmError> {
        let output = self.next_reply(user_message.to_string())?;
        Ok(AgentOutput {
            output,
            tool_calls: vec![],
        })
    }
}

/// Search tool stand-in that answers every call with an empty result list.
pub struct NoopSearch;

#[async_trait]
impl AgentTool for NoopSearch {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Returns no results."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {"query": {"type": "string"}}})
    }

    async fn call(&self, _input: serde_json::Value) -> Result<String, super::ToolError> {
        Ok("[]".to_string())
    }
}
