//! Agent Orchestrator: a reasoning session pre-bound to a search tool and a fixed
//! system instruction. One instance per request; nothing is shared across requests.

use std::sync::Arc;

use tracing::{debug, info};

use crate::llm_client::{AgentOutput, AgentTool, Message, ReasoningService};
use crate::matching::models::SearchFilters;
use crate::matching::prompts::{
    filter_search_system, resume_search_system, FILTER_SEARCH_PROMPT_TEMPLATE,
    RESUME_SEARCH_PROMPT_TEMPLATE,
};
use crate::matching::profile::ProfileAnalysis;
use crate::matching::OrchestrationError;

/// Minimum number of matches requested from a filter-driven search.
pub const FILTER_MIN_MATCHES: usize = 10;
/// Minimum number of matches requested from a résumé-driven search.
pub const RESUME_MIN_MATCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Filters,
    Resume,
}

pub struct JobSearchAgent {
    llm: Arc<dyn ReasoningService>,
    tools: Vec<Arc<dyn AgentTool>>,
    system: String,
    mode: SearchMode,
}

impl JobSearchAgent {
    pub fn new(
        llm: Arc<dyn ReasoningService>,
        search_tool: Arc<dyn AgentTool>,
        mode: SearchMode,
    ) -> Self {
        let system = match mode {
            SearchMode::Filters => filter_search_system(),
            SearchMode::Resume => resume_search_system(),
        };
        Self {
            llm,
            tools: vec![search_tool],
            system,
            mode,
        }
    }

    /// One tool-augmented exchange. Transport failures surface as-is; no retry here.
    pub async fn ask(
        &self,
        user_message: &str,
        history: &[Message],
    ) -> Result<AgentOutput, OrchestrationError> {
        let output = self
            .llm
            .complete_with_tools(&self.system, &self.tools, user_message, history)
            .await
            .map_err(OrchestrationError::Search)?;

        info!(
            "{:?} search finished after {} tool call(s), answer {} chars",
            self.mode,
            output.tool_calls.len(),
            output.output.len()
        );
        for call in &output.tool_calls {
            debug!(tool = %call.tool, is_error = call.is_error, "tool call input: {}", call.input);
        }
        Ok(output)
    }

    pub async fn search_by_filters(
        &self,
        filters: &SearchFilters,
    ) -> Result<AgentOutput, OrchestrationError> {
        let prompt = FILTER_SEARCH_PROMPT_TEMPLATE
            .replace("{criteria}", &build_search_criteria(filters))
            .replace("{min_matches}", &FILTER_MIN_MATCHES.to_string());
        self.ask(&prompt, &[]).await
    }

    pub async fn search_by_profile(
        &self,
        analysis: &ProfileAnalysis,
    ) -> Result<AgentOutput, OrchestrationError> {
        let prompt = RESUME_SEARCH_PROMPT_TEMPLATE
            .replace("{resume_analysis}", analysis.as_str())
            .replace("{min_matches}", &RESUME_MIN_MATCHES.to_string());
        self.ask(&prompt, &[]).await
    }
}

/// One `Label: value` line per present filter, in a fixed order. Absent and blank
/// filters are omitted entirely.
pub fn build_search_criteria(filters: &SearchFilters) -> String {
    let present = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let technologies: Vec<&str> = filters
        .technologies
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    let technologies = (!technologies.is_empty()).then(|| technologies.join(", "));

    [
        ("Job Title", present(&filters.job_title)),
        ("Required Experience", present(&filters.required_experience)),
        ("Required Technologies", technologies),
        ("Work Type", present(&filters.work_type)),
        ("Location", present(&filters.location)),
        ("Company", present(&filters.company)),
        ("Salary Range", present(&filters.salary_range)),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
    .collect::<Vec<_>>()
    .join("\n")
}
