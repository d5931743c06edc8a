//! Text extraction for uploaded course documents.

use crate::error::{CourseServiceError, ExtractError};

/// Maximum number of files accepted in one course upload.
pub const MAX_UPLOAD_FILES: usize = 10;

/// A file received from a client, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// Turns document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    /// # Errors
    ///
    /// Returns `ExtractError` when the bytes are not a readable document.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// PDF extraction backed by `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|err| ExtractError::Pdf(err.to_string()))?;
        if text.trim().is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(text)
    }
}

/// Concatenate the text of every file, each under a `--- File: name ---` banner,
/// in upload order.
///
/// # Errors
///
/// Returns `CourseServiceError::TooManyFiles` above [`MAX_UPLOAD_FILES`] and
/// `CourseServiceError::Extract` naming the first unreadable file.
pub fn compose_content(
    files: &[UploadedFile],
    extractor: &dyn TextExtractor,
) -> Result<String, CourseServiceError> {
    if files.len() > MAX_UPLOAD_FILES {
        return Err(CourseServiceError::TooManyFiles {
            max: MAX_UPLOAD_FILES,
        });
    }

    let mut content = String::new();
    for file in files {
        let text = extractor
            .extract_text(&file.bytes)
            .map_err(|source| CourseServiceError::Extract {
                filename: file.filename.clone(),
                source,
            })?;
        log::debug!("extracted {} chars from {}", text.len(), file.filename);
        content.push_str("\n\n--- File: ");
        content.push_str(&file.filename);
        content.push_str(" ---\n\n");
        content.push_str(&text);
    }
    Ok(content)
}
