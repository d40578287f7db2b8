//! Cover letter pipeline: résumé document plus job description in, letter out.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::extraction::{extract, Document, ExtractionError};
use crate::llm_client::{LlmError, Message, ReasoningService};
use prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};

#[derive(Debug, Error)]
pub enum CoverLetterError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Cover letter generation failed: {0}")]
    Generation(#[from] LlmError),
}

/// A generated letter with the inputs it was derived from. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterArtifact {
    pub resume_text: String,
    pub job_description: String,
    pub cover_letter: String,
}

/// Where the job description comes from.
#[derive(Debug, Clone)]
pub enum JobDescriptionSource {
    Text(String),
    Document(Document),
}

pub async fn generate_cover_letter(
    resume_text: &str,
    job_description: &str,
    llm: &dyn ReasoningService,
) -> Result<CoverLetterArtifact, CoverLetterError> {
    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description);
    let letter = llm
        .complete(COVER_LETTER_SYSTEM, &[Message::user(prompt)])
        .await?;
    if letter.trim().is_empty() {
        return Err(CoverLetterError::Generation(LlmError::EmptyContent));
    }

    Ok(CoverLetterArtifact {
        resume_text: resume_text.to_string(),
        job_description: job_description.to_string(),
        cover_letter: letter,
    })
}

/// Extract the résumé, resolve the job description, generate.
pub async fn process_cover_letter(
    resume: &Document,
    job_description: JobDescriptionSource,
    llm: &dyn ReasoningService,
) -> Result<CoverLetterArtifact, CoverLetterError> {
    let resume_text = extract(resume, llm).await?;
    let job_description = match job_description {
        JobDescriptionSource::Text(text) => text,
        JobDescriptionSource::Document(document) => extract(&document, llm).await?.into_string(),
    };

    let artifact = generate_cover_letter(resume_text.as_str(), &job_description, llm).await?;
    info!(
        "Generated cover letter ({} chars)",
        artifact.cover_letter.len()
    );
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::DocumentFormat;
    use crate::llm_client::scripted::ScriptedReasoner;

    const PNG: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn image() -> Document {
        Document::new(PNG.to_vec(), DocumentFormat::Image)
    }

    #[tokio::test]
    async fn test_text_job_description_is_passed_through() {
        let llm = ScriptedReasoner::new(["Jane Doe, Rust", "Dear hiring manager,"]);
        let artifact = process_cover_letter(
            &image(),
            JobDescriptionSource::Text("Backend engineer at Acme".to_string()),
            &llm,
        )
        .await
        .unwrap();

        assert_eq!(artifact.resume_text, "Jane Doe, Rust");
        assert_eq!(artifact.job_description, "Backend engineer at Acme");
        assert_eq!(artifact.cover_letter, "Dear hiring manager,");

        let prompt = &llm.prompts()[1];
        assert!(prompt.contains("Jane Doe, Rust"));
        assert!(prompt.contains("Backend engineer at Acme"));
        assert!(prompt.contains("Concludes professionally"));
    }

    #[tokio::test]
    async fn test_job_description_document_is_extracted() {
        let llm = ScriptedReasoner::new(["resume text", "jd text", "letter"]);
        let artifact = process_cover_letter(
            &image(),
            JobDescriptionSource::Document(image()),
            &llm,
        )
        .await
        .unwrap();
        assert_eq!(artifact.job_description, "jd text");
        assert_eq!(llm.prompts().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_letter_is_error() {
        let llm = ScriptedReasoner::new([" "]);
        let err = generate_cover_letter("resume", "jd", &llm).await.unwrap_err();
        assert!(matches!(err, CoverLetterError::Generation(LlmError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_resume_extraction_failure_stops_pipeline() {
        let llm = ScriptedReasoner::new(["unused"]);
        let empty = Document::new(Vec::<u8>::new(), DocumentFormat::Image);
        let err = process_cover_letter(&empty, JobDescriptionSource::Text("jd".into()), &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, CoverLetterError::Extraction(_)));
    }
}
