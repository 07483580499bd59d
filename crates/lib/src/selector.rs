//! # Content Selection
//!
//! Decides which text a study action analyzes. An uploaded document always
//! wins over pasted text; only uploaded text is capped to `max_words`.

use crate::extract::{extract, ExtractError};
use tracing::{info, warn};

/// A file received from the user, with the MIME type it was declared with.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Where the selected content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Upload,
    Pasted,
}

/// The text chosen for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedContent {
    pub text: String,
    pub source: ContentSource,
    /// Word count before any capping.
    pub original_word_count: usize,
    /// Set when an upload had more than `max_words` words.
    pub truncated: bool,
    /// The word cap in force when this content was selected.
    pub max_words: usize,
}

impl SelectedContent {
    /// The user-facing notice for a truncated upload, if any.
    pub fn warning(&self) -> Option<String> {
        self.truncated.then(|| truncation_warning(self.max_words))
    }
}

pub fn truncation_warning(max_words: usize) -> String {
    format!("This document is long. Only the first {max_words} words are used for analysis.")
}

/// Chooses the analysis text from an optional upload and optional pasted text.
///
/// Returns `Ok(None)` when there is nothing to analyze. An upload whose
/// extracted text is empty counts as "nothing"; pasted text is not consulted
/// in that case.
pub fn select_content(
    upload: Option<&UploadedFile>,
    pasted: Option<&str>,
    max_words: usize,
) -> Result<Option<SelectedContent>, ExtractError> {
    if let Some(file) = upload {
        let extracted = extract(&file.bytes, &file.content_type)?;
        let original_word_count = count_words(&extracted);
        let (text, truncated) = cap_words(&extracted, max_words);
        if truncated {
            warn!(
                file = %file.file_name,
                words = original_word_count,
                "Upload exceeds {max_words} words, truncating."
            );
        }
        if text.trim().is_empty() {
            info!(file = %file.file_name, "Upload produced no text.");
            return Ok(None);
        }
        return Ok(Some(SelectedContent {
            text: text.to_string(),
            source: ContentSource::Upload,
            original_word_count,
            truncated,
            max_words,
        }));
    }

    match pasted {
        Some(text) if !text.is_empty() => Ok(Some(SelectedContent {
            text: text.to_string(),
            source: ContentSource::Pasted,
            original_word_count: count_words(text),
            truncated: false,
            max_words,
        })),
        _ => Ok(None),
    }
}

/// Counts whitespace-delimited words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Caps `text` to its first `max_words` whitespace-delimited words.
///
/// Text within the cap is returned unchanged. Otherwise the result is the
/// prefix of `text` that ends with the last kept word, so the original
/// spacing between kept words survives. The flag reports whether a cut happened.
pub fn cap_words(text: &str, max_words: usize) -> (&str, bool) {
    let mut end = 0;
    let mut kept = 0;
    loop {
        let rest = &text[end..];
        let word = rest.trim_start();
        if word.is_empty() {
            return (text, false);
        }
        if kept == max_words {
            return (&text[..end], true);
        }
        let start = end + (rest.len() - word.len());
        end = start + word.find(char::is_whitespace).unwrap_or(word.len());
        kept += 1;
    }
}
