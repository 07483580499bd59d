//! # Study Handlers
//!
//! Both routes accept the same multipart form: an optional `file` part and an
//! optional `text` part. `POST /study` answers with the HTML page,
//! `POST /api/study` with JSON.

use super::{wrap_response, ApiResponse, AppError, AppState, DebugParams};
use crate::{
    page::{render_page, PageView},
    types::StudyResponse,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::Multipart;
use serde_json::json;
use studymate::{
    constants::{MIME_DOCX, MIME_PDF, MIME_TEXT},
    presenter::{classify_qa, Presentation},
    selector::{ContentSource, UploadedFile},
};
use tracing::{debug, info, warn};

/// Shown when neither a usable document nor pasted text was submitted.
pub const NO_CONTENT_MESSAGE: &str = "Upload a document or paste some text first.";

const OCTET_STREAM: &str = "application/octet-stream";

/// The decoded study form.
#[derive(Debug, Default)]
pub struct StudyForm {
    pub upload: Option<UploadedFile>,
    pub text: Option<String>,
}

/// The MIME type an upload is treated as.
///
/// The declared type wins. Browsers that cannot map an extension send either
/// nothing or `application/octet-stream`; for those the file extension decides.
pub fn declared_content_type(file_name: &str, declared: Option<&str>) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|d| !d.is_empty()) {
        if !declared.eq_ignore_ascii_case(OCTET_STREAM) {
            return declared.to_string();
        }
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") => MIME_TEXT.to_string(),
        Some("pdf") => MIME_PDF.to_string(),
        Some("docx") => MIME_DOCX.to_string(),
        _ => declared.unwrap_or(OCTET_STREAM).to_string(),
    }
}

/// Reads the `file` and `text` parts of the study form.
///
/// A `file` part with no name and no bytes is the browser's "nothing chosen"
/// and is ignored.
pub async fn read_study_form(mut multipart: Multipart) -> Result<StudyForm, AppError> {
    let mut form = StudyForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let declared = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

                if file_name.is_empty() && bytes.is_empty() {
                    debug!("Empty file field, no document uploaded.");
                    continue;
                }

                let content_type = declared_content_type(&file_name, declared.as_deref());
                info!(
                    "Received upload '{}' ({}, {} bytes).",
                    file_name,
                    content_type,
                    bytes.len()
                );
                form.upload = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            "text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read text: {e}")))?;
                form.text = Some(text);
            }
            _ => warn!("Ignoring unknown multipart field: {}", name),
        }
    }

    Ok(form)
}

/// Handles the form submitted from the page and renders the result page.
pub async fn study_page_handler(
    State(app_state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let form = match read_study_form(multipart).await {
        Ok(form) => form,
        Err(err) => return error_page(err, ""),
    };
    let pasted_text = form.text.as_deref().unwrap_or("");

    match app_state
        .assistant
        .run(form.upload.as_ref(), form.text.as_deref())
        .await
    {
        Ok(Some(outcome)) => {
            let presentation = Presentation::new(&outcome.session.summary, &outcome.session.qa);
            let view = PageView {
                pasted_text,
                warning: outcome.warning.as_deref(),
                presentation: Some(&presentation),
                saved_to: Some(&app_state.config.log_path),
                ..Default::default()
            };
            page_response(StatusCode::OK, &view)
        }
        Ok(None) => {
            let view = PageView {
                pasted_text,
                notice: Some(NO_CONTENT_MESSAGE),
                ..Default::default()
            };
            page_response(StatusCode::OK, &view)
        }
        Err(err) => error_page(err.into(), pasted_text),
    }
}

fn page_response(status: StatusCode, view: &PageView<'_>) -> Response {
    match render_page(view) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::Internal(anyhow::Error::from(e)).into_response(),
    }
}

fn error_page(err: AppError, pasted_text: &str) -> Response {
    err.log();
    let (status, message) = err.status_and_message();
    let view = PageView {
        pasted_text,
        error: Some(message.as_str()),
        ..Default::default()
    };
    page_response(status, &view)
}

/// The JSON variant of the study action.
///
/// Returns 400 when there is nothing to analyze.
pub async fn study_api_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<StudyResponse>>, AppError> {
    let form = read_study_form(multipart).await?;

    let outcome = app_state
        .assistant
        .run(form.upload.as_ref(), form.text.as_deref())
        .await?
        .ok_or_else(|| AppError::BadRequest(NO_CONTENT_MESSAGE.to_string()))?;

    let debug_info = Some(json!({
        "source": match outcome.selected.source {
            ContentSource::Upload => "upload",
            ContentSource::Pasted => "pasted",
        },
        "file_name": form.upload.as_ref().map(|f| f.file_name.as_str()),
        "content_type": form.upload.as_ref().map(|f| f.content_type.as_str()),
        "original_word_count": outcome.selected.original_word_count,
        "truncated": outcome.selected.truncated,
        "max_words": app_state.assistant.max_words(),
        "log_entries": outcome.log_entries,
    }));

    let qa_lines = classify_qa(&outcome.session.qa);
    Ok(wrap_response(
        StudyResponse {
            warning: outcome.warning,
            session: outcome.session,
            qa_lines,
            saved_to: app_state.config.log_path.clone(),
        },
        debug_params,
        debug_info,
    ))
}
