//! Axum route handler for cover letter generation.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::cover_letter::{process_cover_letter, CoverLetterArtifact, JobDescriptionSource};
use crate::errors::AppError;
use crate::extraction::DocumentFormat;
use crate::multipart::UploadForm;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatePayload {
    pub data: CoverLetterArtifact,
}

/// POST /api/v1/cover_letter/create
///
/// Multipart `resume_file` + `resume_type`, and either `job_description` text or
/// `job_description_file` + `job_description_type` (`text` | `pdf` | `image`).
pub async fn handle_create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<CreatePayload>>, AppError> {
    let mut form = UploadForm::read(multipart).await?;

    let resume_format = form.format("resume_type")?;
    let resume = form.file("resume_file")?.into_document(resume_format)?;
    let job_description = job_description_source(&mut form)?;

    let data = process_cover_letter(&resume, job_description, state.llm.as_ref()).await?;

    Ok(ApiResponse::ok(
        "Cover letter generated successfully",
        CreatePayload { data },
    ))
}

fn job_description_source(form: &mut UploadForm) -> Result<JobDescriptionSource, AppError> {
    let text = form.text("job_description").map(str::to_string);
    let kind = form
        .text("job_description_type")
        .map(|k| k.to_ascii_lowercase());

    let Some(file) = form.optional_file("job_description_file") else {
        return text.map(JobDescriptionSource::Text).ok_or_else(|| {
            AppError::Validation(
                "Either job description text or file must be provided".to_string(),
            )
        });
    };

    let kind = kind.ok_or_else(|| {
        AppError::Validation(
            "Job description type must be provided when uploading a file".to_string(),
        )
    })?;

    if kind == "text" {
        if let Some(text) = text {
            return Ok(JobDescriptionSource::Text(text));
        }
        let text = String::from_utf8(file.bytes.to_vec()).map_err(|_| {
            AppError::Validation("Job description file is not valid UTF-8 text".to_string())
        })?;
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Job description file is empty".to_string(),
            ));
        }
        return Ok(JobDescriptionSource::Text(text));
    }

    let format = DocumentFormat::from_label(&kind)?;
    Ok(JobDescriptionSource::Document(file.into_document(format)?))
}
