use bytes::Bytes;
use tracing::debug;

use super::ExtractionError;

/// Extracts the text of every page and concatenates it in page order.
///
/// `pdf-extract` is synchronous and CPU-bound, so the work runs on the blocking
/// pool. A panic inside the parser surfaces as an extraction error, not a crash.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, ExtractionError> {
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))
    })
    .await
    .map_err(|e| ExtractionError::Pdf(format!("PDF parser aborted: {e}")))??;

    debug!("PDF has {} page(s)", pages.len());
    Ok(concat_pages(&pages))
}

/// Joins per-page text exactly as extracted, without separators.
pub fn concat_pages(pages: &[String]) -> String {
    pages.concat()
}

/// True if the upload's content type or leading bytes identify a PDF.
pub fn looks_like_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_pages_preserves_page_order() {
        let pages = vec![
            "Page one.\n".to_string(),
            "Page two.\n".to_string(),
            "Page three.".to_string(),
        ];
        assert_eq!(concat_pages(&pages), "Page one.\nPage two.\nPage three.");
    }

    #[test]
    fn test_concat_single_page_is_identity() {
        let pages = vec!["Only page".to_string()];
        assert_eq!(concat_pages(&pages), "Only page");
    }

    #[test]
    fn test_looks_like_pdf_by_content_type_or_magic() {
        assert!(looks_like_pdf(Some("application/pdf"), b""));
        assert!(looks_like_pdf(Some("Application/PDF; charset=binary"), b""));
        assert!(looks_like_pdf(None, b"%PDF-1.7\n"));
        assert!(!looks_like_pdf(Some("image/png"), b"\x89PNG"));
        assert!(!looks_like_pdf(None, b""));
    }

    /// Minimal PDF with one Helvetica text line per page, xref offsets computed exactly.
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let font_id = 3;
        let page_id = |i: usize| 4 + 2 * i;
        let kids = (0..pages.len())
            .map(|i| format!("{} 0 R", page_id(i)))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];
        for (i, text) in pages.iter().enumerate() {
            let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                page_id(i) + 1
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ));
        }

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        pdf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[tokio::test]
    async fn test_single_page_pdf_text_is_extracted() {
        let bytes = build_pdf(&["Only page"]);
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).unwrap();
        let text = extract_pdf_text(Bytes::from(bytes)).await.unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(text, pages.concat());
        assert!(text.contains("Only page"));
    }

    #[tokio::test]
    async fn test_multi_page_pdf_text_is_concatenated_in_page_order() {
        let bytes = build_pdf(&["First page", "Second page", "Third page"]);
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).unwrap();
        let text = extract_pdf_text(Bytes::from(bytes)).await.unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(text, pages.concat());

        let first = text.find("First page").unwrap();
        let second = text.find("Second page").unwrap();
        let third = text.find("Third page").unwrap();
        assert!(first < second && second < third);
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_rejected() {
        let err = extract_pdf_text(Bytes::from_static(b"%PDF-garbage")).await;
        assert!(matches!(err, Err(ExtractionError::Pdf(_))));
    }
}
