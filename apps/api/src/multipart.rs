//! Buffered multipart form reader shared by the upload endpoints.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{Document, DocumentFormat};

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Wraps the upload as a `Document`, rejecting empty payloads.
    pub fn into_document(self, format: DocumentFormat) -> Result<Document, AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation(format!(
                "Uploaded file '{}' is empty",
                self.file_name.as_deref().unwrap_or("unnamed")
            )));
        }
        Ok(Document::new(self.bytes, format))
    }
}

/// All parts of a multipart request: file parts by field name, the rest as text.
#[derive(Debug, Default)]
pub struct UploadForm {
    files: HashMap<String, UploadedFile>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read file '{name}': {e}"))
                })?;
                debug!(field = %name, size = bytes.len(), "Received file part");
                form.files.insert(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let value = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read field '{name}': {e}"))
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn file(&mut self, name: &str) -> Result<UploadedFile, AppError> {
        self.optional_file(name)
            .ok_or_else(|| AppError::Validation(format!("Missing file field '{name}'")))
    }

    pub fn optional_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Text field value, with blank values treated as absent.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn format(&self, name: &str) -> Result<DocumentFormat, AppError> {
        let label = self
            .text(name)
            .ok_or_else(|| AppError::Validation(format!("Missing field '{name}'")))?;
        Ok(DocumentFormat::from_label(label)?)
    }
}

#[cfg(test)]
impl UploadForm {
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_file(mut self, name: &str, bytes: &'static [u8]) -> Self {
        self.files.insert(
            name.to_string(),
            UploadedFile {
                file_name: Some(format!("{name}.bin")),
                content_type: None,
                bytes: Bytes::from_static(bytes),
            },
        );
        self
    }
}
