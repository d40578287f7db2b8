//! Text Extractor: turns an uploaded document (PDF or raster image) into plain text.
//!
//! PDF text comes from the `pdf-extract` crate, page by page, on the blocking pool.
//! Image text comes from a single vision call through the reasoning service.
//! Extraction is all-or-nothing: any failure fails the request, and an empty
//! result is treated as a failure rather than passed downstream.

pub mod image;
pub mod pdf;
pub mod prompts;

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::llm_client::{LlmError, ReasoningService};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported document format '{0}' (expected 'pdf' or 'image')")]
    UnsupportedFormat(String),

    #[error("Document is empty")]
    EmptyDocument,

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Image text extraction failed: {0}")]
    Vision(#[from] LlmError),

    #[error("No text could be extracted from the document")]
    EmptyText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Image,
}

impl DocumentFormat {
    /// Parses the format label used by upload forms (`pdf` / `image`).
    pub fn from_label(label: &str) -> Result<Self, ExtractionError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "image" => Ok(Self::Image),
            other => Err(ExtractionError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("pdf"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Raw upload plus its declared format. Request-scoped; dropped after extraction.
#[derive(Debug, Clone)]
pub struct Document {
    bytes: Bytes,
    format: DocumentFormat,
}

impl Document {
    pub fn new(bytes: impl Into<Bytes>, format: DocumentFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }
}

/// Plain text derived from a `Document`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: String) -> Result<Self, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts plain text from `document`, dispatching on its format.
pub async fn extract(
    document: &Document,
    llm: &dyn ReasoningService,
) -> Result<ExtractedText, ExtractionError> {
    if document.bytes.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    let text = match document.format {
        DocumentFormat::Pdf => pdf::extract_pdf_text(document.bytes.clone()).await?,
        DocumentFormat::Image => image::extract_image_text(&document.bytes, llm).await?,
    };

    info!(
        "Extracted {} chars from {} document ({} bytes)",
        text.len(),
        document.format(),
        document.bytes.len()
    );

    ExtractedText::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedReasoner;

    const PNG_HEADER: [u8; 16] = [
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D, b'I', b'H', b'D', b'R',
    ];

    #[test]
    fn test_format_from_label_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_label("PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_label(" image ").unwrap(), DocumentFormat::Image);
    }

    #[test]
    fn test_format_from_label_rejects_unknown() {
        let err = DocumentFormat::from_label("docx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref f) if f == "docx"));
    }

    #[tokio::test]
    async fn test_empty_document_fails_before_any_call() {
        let llm = ScriptedReasoner::new(["should not be used"]);
        let doc = Document::new(Vec::<u8>::new(), DocumentFormat::Image);
        let err = extract(&doc, &llm).await.unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyDocument));
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_image_text_is_returned_verbatim() {
        let llm = ScriptedReasoner::new(["Jane Doe\nSenior Engineer\n- Rust, Go"]);
        let doc = Document::new(PNG_HEADER.to_vec(), DocumentFormat::Image);
        let text = extract(&doc, &llm).await.unwrap();
        assert_eq!(text.as_str(), "Jane Doe\nSenior Engineer\n- Rust, Go");
    }

    #[tokio::test]
    async fn test_blank_vision_answer_is_extraction_failure() {
        let llm = ScriptedReasoner::new(["   \n"]);
        let doc = Document::new(PNG_HEADER.to_vec(), DocumentFormat::Image);
        let err = extract(&doc, &llm).await.unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyText));
    }

    #[tokio::test]
    async fn test_vision_service_failure_propagates() {
        let llm = ScriptedReasoner::failing();
        let doc = Document::new(PNG_HEADER.to_vec(), DocumentFormat::Image);
        let err = extract(&doc, &llm).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Vision(_)));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_fails_whole_call() {
        let llm = ScriptedReasoner::new(Vec::<String>::new());
        let doc = Document::new(b"this is not a pdf".to_vec(), DocumentFormat::Pdf);
        let err = extract(&doc, &llm).await.unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }
}
