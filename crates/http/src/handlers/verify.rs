use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use authscan_core::normalize_serial;

use crate::api_error::{ApiError, INVALID_REQUEST};
use crate::response_types::VerifyResponse;
use crate::AppState;

/// Pull a non-empty `code` out of a request body.
///
/// The body is parsed leniently: anything that is not a JSON object with a
/// string `code` counts as no code at all.
pub fn extract_code(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let code = normalize_serial(value.get("code")?.as_str()?);
    (!code.is_empty()).then_some(code)
}

/// Check a scanned code and consume it on first successful verification.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<VerifyResponse>, ApiError> {
    let code = extract_code(&body).ok_or_else(|| ApiError::BadRequest(INVALID_REQUEST.to_owned()))?;
    let outcome = state.verification_service.verify_and_mark(&code).await;
    tracing::debug!(serial = %code, ?outcome, "verify request handled");
    Ok(Json(VerifyResponse::from(outcome)))
}
