//! Error types for Consulate
//!
//! This module defines:
//! - `LogError`: the single error enum returned by every facade operation
//! - `Result`: convenience alias over `LogError`

/// Errors raised by the logging facade and its configuration layer.
///
/// `InvalidInput` is the only error the facade itself produces. Everything
/// else is a failure of a collaborator (a sink, the file system, a config
/// document) passed through unchanged.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Sink(#[from] anyhow::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LogError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LogError::InvalidInput(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, LogError::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
