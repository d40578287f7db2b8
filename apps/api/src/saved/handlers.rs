//! Axum route handlers for saved jobs and saved cover letters.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::cover_letter::CoverLetterArtifact;
use crate::errors::AppError;
use crate::matching::models::JobMatch;
use crate::models::saved::{SavedCoverLetterRow, SavedJobRow};
use crate::response::ApiResponse;
use crate::saved;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobPayload {
    pub job: SavedJobRow,
}

#[derive(Debug, Serialize)]
pub struct JobsPayload {
    pub jobs: Vec<SavedJobRow>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterPayload {
    pub cover_letter: SavedCoverLetterRow,
}

#[derive(Debug, Serialize)]
pub struct CoverLettersPayload {
    pub cover_letters: Vec<SavedCoverLetterRow>,
}

#[derive(Debug, Serialize)]
pub struct Empty {}

// ────────────────────────────────────────────────────────────────────────────
// Saved jobs
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/save/:owner_id
pub async fn handle_save_job(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(job): Json<JobMatch>,
) -> Result<Json<ApiResponse<JobPayload>>, AppError> {
    let job = saved::save_job(&state.db, owner_id, &job).await?;
    Ok(ApiResponse::ok("Job saved successfully", JobPayload { job }))
}

/// GET /api/v1/jobs/:owner_id
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobsPayload>>, AppError> {
    let jobs = saved::list_jobs(&state.db, owner_id).await?;
    Ok(ApiResponse::ok("Jobs fetched successfully", JobsPayload { jobs }))
}

/// GET /api/v1/jobs/get_by_id/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobPayload>>, AppError> {
    let job = saved::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(ApiResponse::ok("Job fetched successfully", JobPayload { job }))
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    if !saved::delete_job(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    Ok(ApiResponse::ok("Job deleted successfully", Empty {}))
}

// ────────────────────────────────────────────────────────────────────────────
// Saved cover letters
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover_letter/save/:owner_id
pub async fn handle_save_cover_letter(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(artifact): Json<CoverLetterArtifact>,
) -> Result<Json<ApiResponse<CoverLetterPayload>>, AppError> {
    if artifact.cover_letter.trim().is_empty() {
        return Err(AppError::Validation(
            "cover_letter cannot be empty".to_string(),
        ));
    }
    let cover_letter = saved::save_cover_letter(&state.db, owner_id, &artifact).await?;
    Ok(ApiResponse::ok(
        "Cover letter saved successfully",
        CoverLetterPayload { cover_letter },
    ))
}

/// GET /api/v1/cover_letter/:owner_id
pub async fn handle_list_cover_letters(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CoverLettersPayload>>, AppError> {
    let cover_letters = saved::list_cover_letters(&state.db, owner_id).await?;
    Ok(ApiResponse::ok(
        "Cover letters fetched successfully",
        CoverLettersPayload { cover_letters },
    ))
}

/// GET /api/v1/cover_letter/get_by_id/:id
pub async fn handle_get_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CoverLetterPayload>>, AppError> {
    let cover_letter = saved::get_cover_letter(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cover letter {id} not found")))?;
    Ok(ApiResponse::ok(
        "Cover letter fetched successfully",
        CoverLetterPayload { cover_letter },
    ))
}

/// DELETE /api/v1/cover_letter/:id
pub async fn handle_delete_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Empty>>, AppError> {
    if !saved::delete_cover_letter(&state.db, id).await? {
        return Err(AppError::NotFound(format!("Cover letter {id} not found")));
    }
    Ok(ApiResponse::ok("Cover letter deleted successfully", Empty {}))
}
