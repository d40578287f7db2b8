//! Job matching pipelines: résumé-driven and filter-driven search.
//!
//! Stages run strictly in sequence (extract, analyze, search, parse). Extraction and
//! orchestration failures propagate; parse failures degrade into an empty result.

pub mod agent;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod profile;
pub mod prompts;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::extraction::{extract, Document, ExtractionError};
use crate::llm_client::{AgentTool, LlmError, ReasoningService};
use agent::{JobSearchAgent, SearchMode};
use models::{JobMatchesResponse, SearchFilters};
use parser::parse_job_matches;
use profile::{analyze_profile, ProfileAnalysis};

#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("Resume analysis failed: {0}")]
    Analysis(#[source] LlmError),

    #[error("Job search failed: {0}")]
    Search(#[source] LlmError),
}

#[derive(Debug, Error)]
pub enum MatchingError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),
}

#[derive(Debug, Serialize)]
pub struct ResumeMatches {
    pub resume_analysis: ProfileAnalysis,
    pub job_matches: JobMatchesResponse,
}

/// Résumé path: extract text, analyze the profile, search, parse.
pub async fn process_resume(
    document: &Document,
    llm: Arc<dyn ReasoningService>,
    search_tool: Arc<dyn AgentTool>,
) -> Result<ResumeMatches, MatchingError> {
    let text = extract(document, llm.as_ref()).await?;
    let resume_analysis = analyze_profile(&text, llm.as_ref())
        .await
        .map_err(OrchestrationError::Analysis)?;

    let agent = JobSearchAgent::new(llm, search_tool, SearchMode::Resume);
    let answer = agent.search_by_profile(&resume_analysis).await?;
    let job_matches = parse_job_matches(&answer.output);

    info!(
        "Resume search returned {} match(es)",
        job_matches.matches.len()
    );
    Ok(ResumeMatches {
        resume_analysis,
        job_matches,
    })
}

/// Filter path: search with the present criteria, parse.
pub async fn process_job_search(
    filters: &SearchFilters,
    llm: Arc<dyn ReasoningService>,
    search_tool: Arc<dyn AgentTool>,
) -> Result<JobMatchesResponse, OrchestrationError> {
    let agent = JobSearchAgent::new(llm, search_tool, SearchMode::Filters);
    let answer = agent.search_by_filters(filters).await?;
    let job_matches = parse_job_matches(&answer.output);

    info!(
        "Filter search returned {} match(es)",
        job_matches.matches.len()
    );
    Ok(job_matches)
}
