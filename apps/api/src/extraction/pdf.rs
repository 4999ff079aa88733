//! PDF text via `pdf-extract`.

use crate::extraction::ExtractionError;

pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
