//! Built-in file sink
//!
//! Appends one line per record:
//!
//! ```text
//! 2026-10-19T08:15:02.431Z [WARNING] health check flapping {"node":"consul-1"}
//! ```
//!
//! The context JSON is omitted when the context is empty. Line breaks inside a
//! message are written as `\n` and `\r` so a record never spans lines. The
//! file handle is held for the lifetime of the sink and released on drop.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use consulate_common::{LogError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::message::{Context, render_context};
use crate::severity::Severity;
use crate::sink::LogSink;

/// Log rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Never rotate; the file name is exactly the configured path (default)
    #[default]
    Never,
    /// Rotate hourly
    Hourly,
    /// Rotate daily
    Daily,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
        }
    }
}

impl FromStr for LogRotation {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(LogRotation::Never),
            "hourly" => Ok(LogRotation::Hourly),
            "daily" => Ok(LogRotation::Daily),
            _ => Err(LogError::invalid_input(format!(
                "log rotation must be one of [\"never\", \"hourly\", \"daily\"], \"{}\" seen",
                s
            ))),
        }
    }
}

/// Sink writing line-oriented records to a file.
pub struct FileSink {
    path: PathBuf,
    rotation: LogRotation,
    writer: Mutex<RollingFileAppender>,
}

impl FileSink {
    /// Open (or create) `path` for appending, without rotation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_rotation(path, LogRotation::Never)
    }

    /// Open a sink whose file name is derived from `path` and `rotation`.
    ///
    /// Missing parent directories are created.
    pub fn open_with_rotation(path: impl AsRef<Path>, rotation: LogRotation) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file_name = path.file_name().ok_or_else(|| {
            LogError::invalid_input(format!(
                "file sink path \"{}\" has no file name",
                path.display()
            ))
        })?;
        let prefix = file_name.to_str().ok_or_else(|| {
            LogError::invalid_input(format!(
                "file sink name {:?} is not valid UTF-8",
                file_name
            ))
        })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        std::fs::create_dir_all(dir)?;

        let appender = RollingFileAppender::builder()
            .rotation(rotation.into())
            .filename_prefix(prefix)
            .build(dir)
            .map_err(io::Error::other)?;

        tracing::debug!(path = %path.display(), ?rotation, "File sink opened");

        Ok(Self {
            path,
            rotation,
            writer: Mutex::new(appender),
        })
    }

    /// The requested path.
    ///
    /// With [`LogRotation::Hourly`] or [`LogRotation::Daily`] records go to
    /// `<path>.<date>` in the same directory, so this exact file never exists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rotation(&self) -> LogRotation {
        self.rotation
    }

    /// Render one record line, including the trailing newline.
    pub fn format_record(
        timestamp: DateTime<Utc>,
        severity: Severity,
        message: &str,
        context: &Context,
    ) -> String {
        let mut line = format!(
            "{} [{}] {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            severity.as_str().to_uppercase(),
            escape_line_breaks(message)
        );
        if let Some(context) = render_context(context) {
            line.push(' ');
            line.push_str(&context);
        }
        line.push('\n');
        line
    }
}

fn escape_line_breaks(message: &str) -> Cow<'_, str> {
    if !message.contains(['\n', '\r']) {
        return Cow::Borrowed(message);
    }
    let mut escaped = String::with_capacity(message.len() + 8);
    for c in message.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

impl LogSink for FileSink {
    fn log(&self, severity: Severity, message: &str, context: &Context) -> anyhow::Result<()> {
        let line = Self::format_record(Utc::now(), severity, message, context);
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Debug for FileSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSink")
            .field("path", &self.path)
            .field("rotation", &self.rotation)
            .finish()
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.get_mut().flush() {
            eprintln!("Failed to flush file sink {}: {}", self.path.display(), e);
        }
        tracing::debug!(path = %self.path.display(), "File sink closed");
    }
}
