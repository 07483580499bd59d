use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use studymate::{extract::ExtractError, PromptError, StudyError};
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors from the study workflow.
    Study(StudyError),
    /// The request was malformed or carried nothing to analyze.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<StudyError> for AppError {
    fn from(err: StudyError) -> Self {
        AppError::Study(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl AppError {
    /// The status code and the user-facing message for this error.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            // Parser details stay in the log; they can carry source paths.
            AppError::Study(StudyError::Extract(e)) => {
                let message = match e {
                    ExtractError::PdfParse(_) => "Could not read the PDF document.",
                    ExtractError::Docx(_) => "Could not read the Word document.",
                    ExtractError::InvalidUtf8(_) => "The text file is not valid UTF-8.",
                    ExtractError::Unsupported(_) => "This document type is not supported.",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, message.to_string())
            }
            AppError::Study(StudyError::Completion(e)) => match e {
                PromptError::AiRequest(e) => (
                    StatusCode::BAD_GATEWAY,
                    format!("Request to AI provider failed: {e}"),
                ),
                PromptError::AiDeserialization(e) => (
                    StatusCode::BAD_GATEWAY,
                    format!("Failed to deserialize AI provider response: {e}"),
                ),
                PromptError::AiApi(e) => {
                    (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                }
                PromptError::EmptyResponse => (
                    StatusCode::BAD_GATEWAY,
                    "AI provider returned an empty response.".to_string(),
                ),
                PromptError::ReqwestClientBuild(_)
                | PromptError::MissingAiProvider(_)
                | PromptError::MissingApiKey => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server is not configured correctly.".to_string(),
                ),
            },
            AppError::Study(StudyError::SessionLog(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Could not save the session: {e}"),
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.".to_string(),
            ),
        }
    }

    pub(crate) fn log(&self) {
        match self {
            AppError::Study(err) => error!("StudyError: {:?}", err),
            AppError::BadRequest(message) => warn!("Bad request: {}", message),
            AppError::Internal(err) => error!("Internal server error: {:?}", err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status_code, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_details_are_not_shown_to_users() {
        let err = AppError::Study(StudyError::Extract(ExtractError::PdfParse(
            "Try at /root/.cargo/registry/src/pdf-0.9.1/src/file.rs:162:31".to_string(),
        )));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(message, "Could not read the PDF document.");
    }
}
