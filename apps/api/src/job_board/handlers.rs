//! Axum route handlers for the public job board.

use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::job_board::detail::JobDetail;
use crate::job_board::fetcher::JobFetcher;
use crate::job_board::mapping::to_job_match;
use crate::job_board::query::JobBoardQuery;
use crate::job_board::search_job_ids;
use crate::matching::models::JobMatch;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Upper bound on ids accepted by one fetch request.
pub const MAX_FETCH_IDS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct FetchRequest {
    pub job_ids: Vec<String>,
    #[serde(default)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FetchPayload {
    pub jobs: Vec<JobDetail>,
    pub job_matches: Vec<JobMatch>,
}

#[derive(Debug, Serialize)]
pub struct SearchPayload {
    pub job_ids: Vec<String>,
}

/// POST /api/v1/job_board/fetch
///
/// `jobs[i]` always corresponds to `job_ids[i]`; `job_matches` skips failed fetches.
pub async fn handle_fetch(
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> Result<Json<ApiResponse<FetchPayload>>, AppError> {
    validate_job_ids(&request.job_ids)?;

    let config = &state.config;
    let fetcher = JobFetcher::new(
        config.job_board_base_url.clone(),
        Duration::from_secs(config.job_fetch_timeout_secs),
    );
    let batch_size = request.batch_size.unwrap_or(config.job_fetch_batch_size);
    let jobs = fetcher.fetch_all(&request.job_ids, batch_size).await;
    let job_matches = jobs.iter().filter_map(to_job_match).collect();

    Ok(ApiResponse::ok(
        "Job details fetched",
        FetchPayload { jobs, job_matches },
    ))
}

/// POST /api/v1/job_board/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(query): Json<JobBoardQuery>,
) -> Result<Json<ApiResponse<SearchPayload>>, AppError> {
    if query.keywords.trim().is_empty() {
        return Err(AppError::Validation("keywords cannot be empty".to_string()));
    }

    let job_ids = search_job_ids(
        &state.config.job_board_base_url,
        &query,
        Duration::from_secs(state.config.job_fetch_timeout_secs),
    )
    .await?;

    Ok(ApiResponse::ok(
        format!("Found {} job(s)", job_ids.len()),
        SearchPayload { job_ids },
    ))
}

fn validate_job_ids(job_ids: &[String]) -> Result<(), AppError> {
    if job_ids.len() > MAX_FETCH_IDS {
        return Err(AppError::Validation(format!(
            "At most {MAX_FETCH_IDS} job_ids can be fetched per request, got {}",
            job_ids.len()
        )));
    }
    if job_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(AppError::Validation(
            "job_ids must not contain blank ids".to_string(),
        ));
    }
    Ok(())
}
