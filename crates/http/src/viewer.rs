//! Scanner page served at `/`.
//!
//! The page is loaded from the templates directory on every request, so it
//! can be edited without restarting the server.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use authscan_core::INDEX_TEMPLATE;

use crate::api_error::PageError;
use crate::AppState;

pub async fn load_index(templates_dir: &Path) -> Result<String, PageError> {
    let path = templates_dir.join(INDEX_TEMPLATE);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(html),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PageError::TemplateMissing),
        Err(e) => Err(PageError::TemplateUnreadable(e)),
    }
}

/// Serve the scanner HTML page
pub async fn serve_index(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    load_index(&state.templates_dir).await.map(Html)
}
