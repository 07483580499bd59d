//! # Text Extraction
//!
//! Turns an uploaded document into plain text. The document type is taken from
//! the MIME type declared by the uploader; the bytes are never sniffed.
//!
//! - `text/plain` is decoded as UTF-8 verbatim.
//! - `application/pdf` yields the text of every page, in page order.
//! - `.docx` documents yield their body paragraphs joined by `\n`.
//! - Anything else yields an empty string.

#[cfg(feature = "docx")]
pub mod docx;
#[cfg(feature = "pdf")]
pub mod pdf;

use crate::constants::{MIME_DOCX, MIME_PDF, MIME_TEXT};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Uploaded text is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
    #[error("Failed to read Word document: {0}")]
    Docx(String),
    #[error("Support for {0} documents is not enabled in this build")]
    Unsupported(&'static str),
}

/// The document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
    Unknown,
}

impl DocumentKind {
    /// Classifies a declared MIME type. Parameters such as `; charset=utf-8`
    /// and letter case are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_TEXT => DocumentKind::PlainText,
            MIME_PDF => DocumentKind::Pdf,
            MIME_DOCX => DocumentKind::Docx,
            _ => DocumentKind::Unknown,
        }
    }
}

/// Extracts plain text from `content` according to its declared MIME type.
#[instrument(skip(content), fields(len = content.len()))]
pub fn extract(content: &[u8], declared_mime_type: &str) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_mime(declared_mime_type);
    debug!(?kind, "Resolved document kind.");

    let text = match kind {
        DocumentKind::PlainText => std::str::from_utf8(content)?.to_string(),
        DocumentKind::Pdf => extract_pdf(content)?,
        DocumentKind::Docx => extract_docx(content)?,
        DocumentKind::Unknown => {
            info!("Unrecognized content type '{declared_mime_type}', no text extracted.");
            String::new()
        }
    };

    Ok(text)
}

#[cfg(feature = "pdf")]
fn extract_pdf(content: &[u8]) -> Result<String, ExtractError> {
    self::pdf::extract_text_from_pdf(content)
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_content: &[u8]) -> Result<String, ExtractError> {
    Err(ExtractError::Unsupported("PDF"))
}

#[cfg(feature = "docx")]
fn extract_docx(content: &[u8]) -> Result<String, ExtractError> {
    self::docx::extract_text_from_docx(content)
}

#[cfg(not(feature = "docx"))]
fn extract_docx(_content: &[u8]) -> Result<String, ExtractError> {
    Err(ExtractError::Unsupported("Word"))
}
