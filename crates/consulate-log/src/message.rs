//! Log message payloads and structured context

use std::fmt;

/// Structured context attached to a record: string keys, arbitrary JSON values.
pub type Context = serde_json::Map<String, serde_json::Value>;

/// Compact JSON rendering of a context, `None` when it is empty.
pub(crate) fn render_context(context: &Context) -> Option<String> {
    if context.is_empty() {
        return None;
    }
    serde_json::to_string(context).ok()
}

/// The message part of a log call.
///
/// Callers may log either plain text or a failure value. A failure is reduced
/// to its description before any sink sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMessage {
    Text(String),
    Failure(String),
}

impl LogMessage {
    pub fn text(text: impl Into<String>) -> Self {
        LogMessage::Text(text.into())
    }

    /// Capture the description of an error.
    ///
    /// Only the top-level message is kept; sources are not walked.
    pub fn failure(err: &(dyn std::error::Error + 'static)) -> Self {
        LogMessage::Failure(err.to_string())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LogMessage::Failure(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            LogMessage::Text(text) | LogMessage::Failure(text) => text,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            LogMessage::Text(text) | LogMessage::Failure(text) => text,
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        LogMessage::Text(text.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        LogMessage::Text(text)
    }
}

impl From<&String> for LogMessage {
    fn from(text: &String) -> Self {
        LogMessage::Text(text.clone())
    }
}

impl From<anyhow::Error> for LogMessage {
    fn from(err: anyhow::Error) -> Self {
        LogMessage::Failure(err.to_string())
    }
}

impl From<&anyhow::Error> for LogMessage {
    fn from(err: &anyhow::Error) -> Self {
        LogMessage::Failure(err.to_string())
    }
}

impl From<std::io::Error> for LogMessage {
    fn from(err: std::io::Error) -> Self {
        LogMessage::Failure(err.to_string())
    }
}

impl From<consulate_common::LogError> for LogMessage {
    fn from(err: consulate_common::LogError) -> Self {
        LogMessage::Failure(err.to_string())
    }
}
