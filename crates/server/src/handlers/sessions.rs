use super::{ApiResponse, AppState};
use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

/// Returns every session in the log, oldest first.
///
/// A missing or unreadable log is reported as an empty list.
pub async fn list_sessions_handler(
    State(app_state): State<AppState>,
) -> Json<ApiResponse<Vec<Value>>> {
    let entries = app_state.assistant.session_log().entries().await;
    info!("Listing {} logged sessions.", entries.len());
    Json(ApiResponse {
        debug: None,
        result: entries,
    })
}
