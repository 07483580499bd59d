use serde::{Deserialize, Serialize};
use serde_json::Value;
use studymate::{presenter::QaLine, StudySession};

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// The result of `POST /api/study`.
#[derive(Debug, Serialize)]
pub struct StudyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub session: StudySession,
    pub qa_lines: Vec<QaLine>,
    /// The log file the session was appended to.
    pub saved_to: String,
}
