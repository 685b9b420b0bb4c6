//! Severity levels and their normalization
//!
//! Eight levels ordered from most verbose to most severe. Every textual level
//! that enters the facade goes through [`Severity::parse`]: trim, lowercase,
//! map the legacy `warn` spelling onto `warning`, then look it up.

use std::fmt;
use std::str::FromStr;

use consulate_common::{LogError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Log severity, ordered by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Detailed debug information.
    Debug = 0,
    /// Interesting events.
    Info = 1,
    /// Normal but significant events.
    Notice = 2,
    /// Exceptional occurrences that are not errors.
    Warning = 3,
    /// Runtime errors that do not require immediate action.
    Error = 4,
    /// Critical conditions.
    Critical = 5,
    /// Action must be taken immediately.
    Alert = 6,
    /// System is unusable.
    Emergency = 7,
}

/// Legacy spelling accepted wherever a severity is.
const WARN_ALIAS: &str = "warn";

impl Severity {
    /// All severities in rank order.
    pub const ALL: [Severity; 8] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Alert,
        Severity::Emergency,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Alert => "alert",
            Severity::Emergency => "emergency",
        }
    }

    /// Normalize and validate a textual level.
    ///
    /// # Examples
    ///
    /// ```
    /// use consulate_log::Severity;
    ///
    /// assert_eq!(Severity::parse("  WARN ").unwrap(), Severity::Warning);
    /// assert_eq!(Severity::parse("Critical").unwrap(), Severity::Critical);
    /// assert!(Severity::parse("verbose").is_err());
    /// ```
    pub fn parse(level: &str) -> Result<Self> {
        let normalized = level.trim().to_lowercase();
        let normalized = if normalized == WARN_ALIAS {
            Severity::Warning.as_str().to_string()
        } else {
            normalized
        };

        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == normalized)
            .ok_or_else(|| {
                LogError::invalid_input(format!(
                    "log level must be one of [{}], \"{}\" seen",
                    accepted_levels(),
                    level
                ))
            })
    }

    /// Validate a dynamically typed level, e.g. one read from a config document.
    ///
    /// Only strings are accepted; anything else is rejected by type.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(level) => Self::parse(level),
            other => Err(LogError::invalid_input(format!(
                "log level must be a string, {} seen",
                value_type_name(other)
            ))),
        }
    }
}

fn accepted_levels() -> String {
    Severity::ALL
        .iter()
        .map(|severity| format!("\"{}\"", severity.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&Value> for Severity {
    type Error = LogError;

    fn try_from(value: &Value) -> Result<Self> {
        Self::from_value(value)
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Severity::from_value(&value).map_err(serde::de::Error::custom)
    }
}
