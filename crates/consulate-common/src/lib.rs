//! Consulate Common - Shared types and constants
//!
//! This crate provides the foundational pieces used across Consulate crates:
//! - The `LogError` error type and `Result` alias
//! - Environment variable names and default locations

pub mod error;

// Re-exports for convenience
pub use error::{LogError, Result};

/// Default file sink location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "var/logs/consulate.log";

/// `tracing` target used by the tracing bridge sink
pub const TRACING_TARGET: &str = "consulate";

/// Environment variable names read by `LoggingConfig::from_env`
pub const ENV_LOG_LEVEL: &str = "CONSULATE_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "CONSULATE_LOG_FILE";
pub const ENV_LOG_ROTATION: &str = "CONSULATE_LOG_ROTATION";
