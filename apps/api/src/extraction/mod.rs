// Document text extraction.
// Uploads are parsed on the blocking pool; handlers only see the resulting text.

pub mod docx;
pub mod pdf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

/// A single file part taken from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Bytes,
}

/// Supported upload formats, resolved from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
}

impl DocumentKind {
    /// `.pdf` selects PDF; everything else is read as `.docx`, the format the upload form offers.
    pub fn from_file_name(file_name: &str) -> Self {
        let is_pdf = file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            DocumentKind::Pdf
        } else {
            DocumentKind::Docx
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a readable .docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive has no '{0}' part")]
    MissingPart(&'static str),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// Turns an uploaded document into raw text.
///
/// Carried in `AppState` as `Arc<dyn TextExtractor>`.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: UploadedDocument) -> Result<String, AppError>;
}

/// Default extractor: `.docx` via the OOXML parts, `.pdf` via `pdf-extract`.
pub struct DocumentTextExtractor;

#[async_trait]
impl TextExtractor for DocumentTextExtractor {
    async fn extract(&self, document: UploadedDocument) -> Result<String, AppError> {
        let kind = DocumentKind::from_file_name(&document.file_name);
        let UploadedDocument {
            field_name,
            file_name,
            bytes,
        } = document;

        let result = tokio::task::spawn_blocking(move || extract_text(kind, &bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?;

        let text = result.map_err(|e| AppError::Extraction(format!("{file_name}: {e}")))?;
        debug!(
            "Extracted {} chars from {field_name} ({file_name}, {kind:?})",
            text.chars().count()
        );
        Ok(text)
    }
}

/// Synchronous extraction. CPU-bound; call from `spawn_blocking` in async code.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::Docx => docx::extract_text(bytes),
        DocumentKind::Pdf => pdf::extract_text(bytes),
    }
}
