//! Axum route handler for resume scoring.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::multipart::UploadForm;
use crate::response::ApiResponse;
use crate::scoring::{process_resume_score, ResumeScoreReport};
use crate::state::AppState;

/// POST /api/v1/resume_score/score
///
/// Multipart `resume_file` plus `resume_type` (`pdf` | `image`).
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ResumeScoreReport>>, AppError> {
    let mut form = UploadForm::read(multipart).await?;
    let format = form.format("resume_type")?;
    let document = form.file("resume_file")?.into_document(format)?;

    let report = process_resume_score(&document, state.llm.as_ref()).await?;

    Ok(ApiResponse::ok("Resume scored successfully", report))
}
