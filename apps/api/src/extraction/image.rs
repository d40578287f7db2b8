use base64::Engine as _;
use tracing::debug;

use super::prompts::{IMAGE_EXTRACTION_PROMPT, IMAGE_EXTRACTION_SYSTEM};
use super::ExtractionError;
use crate::llm_client::{Message, ReasoningService};

/// Raster formats the vision endpoint accepts.
const SUPPORTED_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Sends the image to the reasoning service with a fixed transcription instruction
/// and returns its answer verbatim.
pub async fn extract_image_text(
    bytes: &[u8],
    llm: &dyn ReasoningService,
) -> Result<String, ExtractionError> {
    let media_type = detect_media_type(bytes)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    debug!(
        "Sending {media_type} image ({} base64 chars) for transcription",
        encoded.len()
    );

    let message = Message::user_with_image(IMAGE_EXTRACTION_PROMPT, media_type, encoded);
    let text = llm.complete(IMAGE_EXTRACTION_SYSTEM, &[message]).await?;
    Ok(text)
}

/// Sniffs the MIME type from the leading bytes; the upload's declared type is not trusted.
pub fn detect_media_type(bytes: &[u8]) -> Result<&'static str, ExtractionError> {
    let kind = infer::get(bytes)
        .ok_or_else(|| ExtractionError::UnsupportedImage("unrecognised file type".to_string()))?;

    SUPPORTED_MEDIA_TYPES
        .iter()
        .copied()
        .find(|supported| *supported == kind.mime_type())
        .ok_or_else(|| ExtractionError::UnsupportedImage(kind.mime_type().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedReasoner;

    #[test]
    fn test_detect_png_and_jpeg() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F'];
        assert_eq!(detect_media_type(&png).unwrap(), "image/png");
        assert_eq!(detect_media_type(&jpeg).unwrap(), "image/jpeg");
    }

    #[test]
    fn test_detect_rejects_non_images() {
        let err = detect_media_type(b"%PDF-1.4 not an image").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedImage(ref m) if m == "application/pdf"));
        assert!(detect_media_type(b"plain text").is_err());
    }

    #[tokio::test]
    async fn test_unsupported_image_never_reaches_service() {
        let llm = ScriptedReasoner::new(["unused"]);
        let result = extract_image_text(b"plain text", &llm).await;
        assert!(result.is_err());
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_vision_call_carries_extraction_instruction() {
        let llm = ScriptedReasoner::new(["transcribed"]);
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let text = extract_image_text(&png, &llm).await.unwrap();
        assert_eq!(text, "transcribed");
        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Extract all text"));
    }
}
