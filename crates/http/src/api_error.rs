//! Typed errors for HTTP handlers.
//!
//! `ApiError` renders the JSON shape scanning clients already understand;
//! `PageError` renders a static HTML fragment for the scanner page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::response_types::VerifyResponse;

/// Status text sent with a 400 from `/verify`.
pub const INVALID_REQUEST: &str = "Invalid request";

/// Error from a JSON endpoint.
///
/// Renders as `{"status": message, "valid": false}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: missing, empty or malformed input.
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };
        (status, Json(VerifyResponse { status: message, valid: false })).into_response()
    }
}

/// Failure to produce the scanner page.
#[derive(Debug)]
pub enum PageError {
    /// `index.html` is not in the templates directory.
    TemplateMissing,
    /// The template exists but could not be loaded.
    TemplateUnreadable(std::io::Error),
}

const MISSING_TEMPLATE_HTML: &str = "<h3 style='color:red;text-align:center'>\
    Error: index.html template not found. \
    Please ensure it is in the /templates folder.</h3>";

const UNREADABLE_TEMPLATE_HTML: &str = "<h3 style='color:red;text-align:center'>\
    Error loading index.html - please check the template file.</h3>";

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let body = match self {
            Self::TemplateMissing => {
                tracing::error!("index template not found");
                MISSING_TEMPLATE_HTML
            },
            Self::TemplateUnreadable(e) => {
                tracing::error!(error = %e, "failed to load index template");
                UNREADABLE_TEMPLATE_HTML
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
