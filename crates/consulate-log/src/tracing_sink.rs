//! Bridge from facade records into `tracing`
//!
//! `tracing` has five levels; the eight severities are folded onto them and
//! the original severity is kept as a field.

use consulate_common::TRACING_TARGET;

use crate::message::{Context, render_context};
use crate::severity::Severity;
use crate::sink::LogSink;

/// Re-emits every record as a `tracing` event under the `consulate` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingSink {
    fn log(&self, severity: Severity, message: &str, context: &Context) -> anyhow::Result<()> {
        let context = render_context(context).unwrap_or_default();
        let name = severity.as_str();
        match severity {
            Severity::Debug => tracing::debug!(
                target: TRACING_TARGET,
                severity = name,
                context = context.as_str(),
                "{}",
                message
            ),
            Severity::Info | Severity::Notice => tracing::info!(
                target: TRACING_TARGET,
                severity = name,
                context = context.as_str(),
                "{}",
                message
            ),
            Severity::Warning => tracing::warn!(
                target: TRACING_TARGET,
                severity = name,
                context = context.as_str(),
                "{}",
                message
            ),
            Severity::Error | Severity::Critical | Severity::Alert | Severity::Emergency => tracing::error!(
                target: TRACING_TARGET,
                severity = name,
                context = context.as_str(),
                "{}",
                message
            ),
        }
        Ok(())
    }
}
