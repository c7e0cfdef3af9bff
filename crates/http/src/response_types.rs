//! Request and response bodies.

use authscan_core::VerifyOutcome;
use serde::{Deserialize, Serialize};

/// Body returned by `POST /verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: String,
    pub valid: bool,
}

impl From<VerifyOutcome> for VerifyResponse {
    fn from(outcome: VerifyOutcome) -> Self {
        Self { status: outcome.message().to_owned(), valid: outcome.is_valid() }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
