//! # General Route Handlers
//!
//! The landing page and the health check.

use super::AppError;
use crate::page::{render_page, PageView};
use axum::response::Html;

/// The handler for the root (`/`) endpoint: the empty study form.
pub async fn root() -> Result<Html<String>, AppError> {
    let html = render_page(&PageView::default()).map_err(anyhow::Error::from)?;
    Ok(Html(html))
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
