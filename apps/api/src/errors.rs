use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cover_letter::CoverLetterError;
use crate::extraction::ExtractionError;
use crate::job_board::JobBoardError;
use crate::llm_client::LlmError;
use crate::matching::{MatchingError, OrchestrationError};
use crate::scoring::ScoringError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::UnsupportedFormat(_)
            | ExtractionError::EmptyDocument
            | ExtractionError::UnsupportedImage(_) => AppError::Validation(e.to_string()),
            ExtractionError::Pdf(_) | ExtractionError::EmptyText => {
                AppError::UnprocessableEntity(e.to_string())
            }
            ExtractionError::Vision(_) => AppError::Llm(e.to_string()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e.to_string())
    }
}

impl From<OrchestrationError> for AppError {
    fn from(e: OrchestrationError) -> Self {
        AppError::Llm(e.to_string())
    }
}

impl From<MatchingError> for AppError {
    fn from(e: MatchingError) -> Self {
        match e {
            MatchingError::Extraction(e) => e.into(),
            MatchingError::Orchestration(e) => e.into(),
        }
    }
}

impl From<ScoringError> for AppError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::Extraction(e) => e.into(),
            ScoringError::Service(e) => e.into(),
            other => AppError::Scoring(other.to_string()),
        }
    }
}

impl From<CoverLetterError> for AppError {
    fn from(e: CoverLetterError) -> Self {
        match e {
            CoverLetterError::Extraction(e) => e.into(),
            CoverLetterError::Generation(e) => e.into(),
        }
    }
}

impl From<JobBoardError> for AppError {
    fn from(e: JobBoardError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Scoring(msg) => {
                tracing::error!("Scoring error: {msg}");
                (StatusCode::BAD_GATEWAY, "SCORING_ERROR", msg.clone())
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The job board could not be reached".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_errors_map_to_client_or_upstream_status() {
        let status = |e: ExtractionError| AppError::from(e).into_response().status();
        assert_eq!(
            status(ExtractionError::UnsupportedFormat("docx".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(ExtractionError::EmptyDocument), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(ExtractionError::Pdf("bad xref".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status(ExtractionError::Vision(LlmError::EmptyContent)),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_scoring_error_names_component() {
        let err = AppError::from(ScoringError::OutOfRange {
            component: "Resume Format".to_string(),
            value: 25.0,
        });
        assert!(err.to_string().contains("Resume Format"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("job".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
