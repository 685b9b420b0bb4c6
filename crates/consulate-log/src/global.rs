//! Process-wide facade
//!
//! A lazily initialized [`LogFacade`] behind a `parking_lot::RwLock`, with
//! free functions mirroring every facade operation. Logging takes a recursive
//! read lock, so a sink may log through this module again. A sink must not
//! call any of the mutating functions while it is being dispatched to.

use std::path::Path;
use std::sync::LazyLock;

use consulate_common::Result;
use parking_lot::RwLock;
use serde_json::Value;

use crate::config::LoggingConfig;
use crate::facade::LogFacade;
use crate::macros::impl_severity_methods;
use crate::message::{Context, LogMessage};
use crate::severity::Severity;
use crate::sink::SinkCandidate;

static FACADE: LazyLock<RwLock<LogFacade>> = LazyLock::new(|| RwLock::new(LogFacade::new()));

/// The process-wide facade.
pub fn facade() -> &'static RwLock<LogFacade> {
    &FACADE
}

/// Replace the process-wide facade with one built from `config`.
///
/// The previous facade, and its file sink, is dropped.
pub fn install(config: &LoggingConfig) -> Result<()> {
    let facade = LogFacade::from_config(config)?;
    *FACADE.write() = facade;
    Ok(())
}

pub fn set_threshold(level: &str) -> Result<()> {
    FACADE.write().set_threshold(level)
}

pub fn threshold() -> Severity {
    FACADE.read().threshold()
}

pub fn add_sink(sink: impl Into<SinkCandidate>) -> Result<()> {
    FACADE.write().add_sink(sink)
}

pub fn set_sinks<I, S>(sinks: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<SinkCandidate>,
{
    FACADE.write().set_sinks(sinks)
}

pub fn reset_sinks() {
    FACADE.write().reset_sinks();
}

pub fn enable_file_sink(path: impl AsRef<Path>) -> Result<()> {
    FACADE.write().enable_file_sink(path)
}

pub fn enable_default_file_sink() -> Result<()> {
    FACADE.write().enable_default_file_sink()
}

pub fn disable_file_sink() {
    FACADE.write().disable_file_sink();
}

pub fn log(level: &str, message: impl Into<LogMessage>, context: &Context) -> Result<()> {
    FACADE.read_recursive().log(level, message, context)
}

pub fn log_value(level: &Value, message: impl Into<LogMessage>, context: &Context) -> Result<()> {
    FACADE.read_recursive().log_value(level, message, context)
}

pub fn log_at(severity: Severity, message: impl Into<LogMessage>, context: &Context) -> Result<()> {
    FACADE.read_recursive().log_at(severity, message, context)
}

impl_severity_methods!(functions;
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
