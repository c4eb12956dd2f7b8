//! Common utilities shared by the identity services.
//!
//! This crate provides:
//! - Unified error handling on top of the domain errors
//! - Configuration structures
//! - Tracing setup

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use telemetry::init_tracing;
