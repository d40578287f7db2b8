use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::{AgentTool, ReasoningService};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Reasoning service. `LlmClient` in production, a scripted stub in tests.
    pub llm: Arc<dyn ReasoningService>,
    /// Search capability granted to job-search sessions.
    pub search_tool: Arc<dyn AgentTool>,
    pub config: Config,
}
