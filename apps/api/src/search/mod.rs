//! Web search tool granted to the job-search agent.
//!
//! `TavilySearch` implements `AgentTool` so it can be handed to
//! `ReasoningService::complete_with_tools`. The model decides when to call it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::llm_client::{AgentTool, ToolError};

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
pub const WEB_SEARCH_TOOL: &str = "web_search";
/// Per-result content is truncated before it is fed back to the model.
const MAX_RESULT_CONTENT_CHARS: usize = 800;

#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Clone)]
pub struct TavilySearch {
    client: Client,
    api_key: String,
    max_results: u32,
}

impl TavilySearch {
    pub fn new(api_key: String, max_results: u32) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key,
            max_results,
        })
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ToolError> {
        info!("Web search: {query}");

        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .json(&TavilyRequest {
                api_key: &self.api_key,
                query,
                max_results: self.max_results,
                search_depth: "basic",
            })
            .send()
            .await
            .map_err(|e| ToolError::Backend(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::Backend(format!(
                "search API returned {status}: {body}"
            )));
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| ToolError::Backend(format!("unreadable search response: {e}")))?;

        debug!("Web search returned {} results", parsed.results.len());
        Ok(parsed.results)
    }
}

#[async_trait]
impl AgentTool for TavilySearch {
    fn name(&self) -> &str {
        WEB_SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Search the web for current job postings and company information. \
         Returns a JSON list of results with title, url and content."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query, e.g. 'senior rust engineer remote job openings'"
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, input: Value) -> Result<String, ToolError> {
        let query = parse_query(&input)?;
        let results = self.search(query).await?;
        render_results(&results)
    }
}

fn parse_query(input: &Value) -> Result<&str, ToolError> {
    input
        .get("query")
        .and_then(|q| q.as_str())
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ToolError::InvalidInput("'query' must be a non-empty string".to_string()))
}

/// Renders results as the compact JSON list handed back to the model.
fn render_results(results: &[SearchResult]) -> Result<String, ToolError> {
    let trimmed: Vec<SearchResult> = results
        .iter()
        .map(|r| SearchResult {
            title: r.title.clone(),
            url: r.url.clone(),
            content: r.content.chars().take(MAX_RESULT_CONTENT_CHARS).collect(),
        })
        .collect();
    serde_json::to_string(&trimmed)
        .map_err(|e| ToolError::Backend(format!("failed to render results: {e}")))
}
