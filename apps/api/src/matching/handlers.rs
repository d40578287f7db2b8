//! Axum route handlers for résumé-driven and filter-driven job search.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::pdf::looks_like_pdf;
use crate::extraction::DocumentFormat;
use crate::matching::models::{JobMatchesResponse, SearchFilters};
use crate::matching::{process_job_search, process_resume, ResumeMatches};
use crate::multipart::UploadForm;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, serde::Serialize)]
pub struct JobSearchPayload {
    pub job_matches: JobMatchesResponse,
}

/// POST /api/v1/resume/upload
///
/// Multipart `file` (PDF). Extracts, analyzes, searches, and parses.
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ResumeMatches>>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let file = form.file("file")?;

    let head = &file.bytes[..file.bytes.len().min(8)];
    if !looks_like_pdf(file.content_type.as_deref(), head) {
        return Err(AppError::Validation(
            "Resume upload must be a PDF file".to_string(),
        ));
    }

    let document = file.into_document(DocumentFormat::Pdf)?;
    let result = process_resume(&document, state.llm.clone(), state.search_tool.clone()).await?;

    info!(
        "Resume processed: {} job match(es)",
        result.job_matches.matches.len()
    );
    Ok(ApiResponse::ok("Resume processed successfully", result))
}

/// POST /api/v1/filters/job_search
pub async fn handle_filter_search(
    State(state): State<AppState>,
    Json(filters): Json<SearchFilters>,
) -> Result<Json<ApiResponse<JobSearchPayload>>, AppError> {
    let job_matches =
        process_job_search(&filters, state.llm.clone(), state.search_tool.clone()).await?;

    Ok(ApiResponse::ok(
        "Job search completed",
        JobSearchPayload { job_matches },
    ))
}
