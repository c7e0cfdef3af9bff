//! Service layer for authscan
//!
//! Centralizes business logic between HTTP/CLI handlers and storage.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod registry_service;
mod verification_service;

pub use error::ServiceError;
pub use registry_service::RegistryService;
pub use verification_service::VerificationService;

#[cfg(test)]
mod test_support;
