//! Level-gated, multi-sink logging facade
//!
//! A [`LogFacade`] owns the whole logging state: the threshold, an ordered
//! list of external sinks and an optional built-in [`FileSink`]. Records below
//! the threshold are dropped; accepted records go to the file sink first and
//! then to every external sink in registration order.
//!
//! Sink failures are not isolated. The first failing sink stops the fan-out
//! and its error is returned to the caller as
//! [`LogError::Sink`](consulate_common::LogError::Sink).

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use consulate_common::{DEFAULT_LOG_FILE, Result};
use serde_json::Value;

use crate::config::LoggingConfig;
use crate::file_sink::{FileSink, LogRotation};
use crate::macros::impl_severity_methods;
use crate::message::{Context, LogMessage};
use crate::severity::Severity;
use crate::sink::{LogSink, SinkCandidate, dispatch};

/// Logging state: threshold, external sinks and the optional file sink.
pub struct LogFacade {
    sinks: Vec<Arc<dyn LogSink>>,
    file_sink: Option<FileSink>,
    threshold: Severity,
}

impl LogFacade {
    /// Empty sink list, no file sink, `warning` threshold.
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            file_sink: None,
            threshold: Severity::Warning,
        }
    }

    /// Build a facade from configuration, opening the file sink if one is set.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut facade = Self::new();
        facade.set_threshold_level(config.level);
        if let Some(file) = &config.file {
            facade.enable_file_sink_with_rotation(file, config.rotation)?;
        }
        Ok(facade)
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Replace the threshold with a normalized textual level.
    pub fn set_threshold(&mut self, level: &str) -> Result<()> {
        self.set_threshold_level(Severity::parse(level)?);
        Ok(())
    }

    /// Replace the threshold with a dynamically typed level; non-strings are rejected.
    pub fn set_threshold_value(&mut self, level: &Value) -> Result<()> {
        self.set_threshold_level(Severity::from_value(level)?);
        Ok(())
    }

    pub fn set_threshold_level(&mut self, severity: Severity) {
        self.threshold = severity;
    }

    /// Whether a record at `severity` would reach the sinks.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.rank() >= self.threshold.rank()
    }

    /// Append a sink. Duplicates are kept.
    pub fn add_sink(&mut self, sink: impl Into<SinkCandidate>) -> Result<()> {
        let sink = sink.into().into_sink()?;
        self.sinks.push(sink);
        tracing::debug!(sinks = self.sinks.len(), "Log sink registered");
        Ok(())
    }

    /// Replace all external sinks.
    ///
    /// Sinks are added one by one. If an entry is invalid the call fails and
    /// the sinks registered before it stay in place; the rest are skipped.
    pub fn set_sinks<I, S>(&mut self, sinks: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<SinkCandidate>,
    {
        self.sinks.clear();
        for sink in sinks {
            self.add_sink(sink)?;
        }
        Ok(())
    }

    /// Drop every external sink; the file sink and threshold are untouched.
    pub fn reset_sinks(&mut self) {
        self.sinks.clear();
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Open the built-in file sink at `path` unless one is already active.
    pub fn enable_file_sink(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.enable_file_sink_with_rotation(path, LogRotation::Never)
    }

    pub fn enable_file_sink_with_rotation(
        &mut self,
        path: impl AsRef<Path>,
        rotation: LogRotation,
    ) -> Result<()> {
        if let Some(active) = &self.file_sink {
            tracing::debug!(
                active = %active.path().display(),
                requested = %path.as_ref().display(),
                "File sink already enabled"
            );
            return Ok(());
        }
        self.file_sink = Some(FileSink::open_with_rotation(path, rotation)?);
        Ok(())
    }

    /// Open the built-in file sink at [`DEFAULT_LOG_FILE`], relative to the
    /// working directory.
    pub fn enable_default_file_sink(&mut self) -> Result<()> {
        self.enable_default_file_sink_in("")
    }

    /// Open the built-in file sink at [`DEFAULT_LOG_FILE`] under `base_dir`.
    pub fn enable_default_file_sink_in(&mut self, base_dir: impl AsRef<Path>) -> Result<()> {
        self.enable_file_sink(base_dir.as_ref().join(DEFAULT_LOG_FILE))
    }

    /// Close the built-in file sink, if any.
    pub fn disable_file_sink(&mut self) {
        self.file_sink = None;
    }

    pub fn has_file_sink(&self) -> bool {
        self.file_sink.is_some()
    }

    /// Path the file sink was opened with.
    ///
    /// Under hourly or daily rotation the file written is `<path>.<date>`;
    /// see [`FileSink::path`].
    pub fn file_sink_path(&self) -> Option<&Path> {
        self.file_sink.as_ref().map(FileSink::path)
    }

    /// Log with a textual level, validated like [`LogFacade::set_threshold`].
    pub fn log(
        &self,
        level: &str,
        message: impl Into<LogMessage>,
        context: &Context,
    ) -> Result<()> {
        self.log_at(Severity::parse(level)?, message, context)
    }

    /// Log with a dynamically typed level, validated like
    /// [`LogFacade::set_threshold_value`]; non-strings are rejected.
    pub fn log_value(
        &self,
        level: &Value,
        message: impl Into<LogMessage>,
        context: &Context,
    ) -> Result<()> {
        self.log_at(Severity::from_value(level)?, message, context)
    }

    pub fn log_at(
        &self,
        severity: Severity,
        message: impl Into<LogMessage>,
        context: &Context,
    ) -> Result<()> {
        if !self.is_enabled(severity) {
            tracing::trace!(%severity, threshold = %self.threshold, "Log record filtered");
            return Ok(());
        }

        let message = message.into();
        let text = message.as_str();

        if let Some(file_sink) = &self.file_sink {
            dispatch(file_sink, severity, text, context)?;
        }

        for sink in &self.sinks {
            dispatch(sink.as_ref(), severity, text, context)?;
        }

        Ok(())
    }

    impl_severity_methods!(methods;
        "System is unusable." emergency, emergency_with => Emergency;
        "Action must be taken immediately." alert, alert_with => Alert;
        "Critical conditions." critical, critical_with => Critical;
        "Runtime errors that do not require immediate action." error, error_with => Error;
        "Exceptional occurrences that are not errors." warning, warning_with => Warning;
        "Normal but significant events." notice, notice_with => Notice;
        "Interesting events." info, info_with => Info;
        "Detailed debug information." debug, debug_with => Debug;
        "Legacy spelling of `warning`." warn, warn_with => Warning;
    );
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("threshold", &self.threshold)
            .field("sinks", &self.sinks.len())
            .field("file_sink", &self.file_sink)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let facade = LogFacade::default();
        assert_eq!(facade.threshold(), Severity::Warning);
        assert_eq!(facade.sink_count(), 0);
        assert!(!facade.has_file_sink());
        assert!(facade.file_sink_path().is_none());
    }

    #[test]
    fn test_is_enabled_follows_threshold() {
        let mut facade = LogFacade::new();
        assert!(!facade.is_enabled(Severity::Notice));
        assert!(facade.is_enabled(Severity::Warning));
        assert!(facade.is_enabled(Severity::Emergency));

        facade.set_threshold_level(Severity::Debug);
        assert!(Severity::ALL.iter().all(|s| facade.is_enabled(*s)));
    }

    #[test]
    fn test_invalid_level_leaves_threshold_unchanged() {
        let mut facade = LogFacade::new();
        facade.set_threshold("error").unwrap();

        assert!(facade.set_threshold("loud").unwrap_err().is_invalid_input());
        assert!(
            facade
                .set_threshold_value(&Value::from(7))
                .unwrap_err()
                .is_invalid_input()
        );
        assert_eq!(facade.threshold(), Severity::Error);
    }

    #[test]
    fn test_default_file_sink_location() {
        let dir = tempfile::tempdir().unwrap();
        let expected = dir.path().join(DEFAULT_LOG_FILE);

        let mut facade = LogFacade::new();
        facade.enable_default_file_sink_in(dir.path()).unwrap();
        assert_eq!(facade.file_sink_path(), Some(expected.as_path()));

        facade.enable_default_file_sink_in(dir.path().join("elsewhere")).unwrap();
        facade.enable_file_sink(dir.path().join("other.log")).unwrap();
        assert_eq!(facade.file_sink_path(), Some(expected.as_path()));

        facade.error("agent unreachable").unwrap();
        facade.disable_file_sink();

        let contents = std::fs::read_to_string(&expected).unwrap();
        assert!(contents.ends_with("[ERROR] agent unreachable\n"));
        assert!(!dir.path().join("other.log").exists());
        assert!(!dir.path().join("elsewhere").exists());
    }

    #[test]
    fn test_log_value_rejects_non_string_level() {
        let facade = LogFacade::new();
        let err = facade
            .log_value(&Value::from(4), "ignored", &Context::new())
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("number seen"));

        let err = facade
            .log_value(&Value::from("fatal"), "ignored", &Context::new())
            .unwrap_err();
        assert!(err.is_invalid_input());

        facade
            .log_value(&Value::from(" Warn "), "accepted", &Context::new())
            .unwrap();
    }

    #[test]
    fn test_debug_output() {
        let facade = LogFacade::new();
        let output = format!("{:?}", facade);
        assert!(output.contains("threshold: Warning"));
        assert!(output.contains("sinks: 0"));
    }
}
