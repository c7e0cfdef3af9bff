//! Core types for authscan
//!
//! Domain types, serial normalization and environment configuration shared
//! across all other crates.

mod config;
mod constants;
mod env_config;
mod error;
mod serial;

pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use serial::*;
