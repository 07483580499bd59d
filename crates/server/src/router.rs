use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Uploads larger than this are rejected before reaching a handler.
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(
            "/study",
            post(handlers::study_page_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/api/study",
            post(handlers::study_api_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/sessions", get(handlers::list_sessions_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
