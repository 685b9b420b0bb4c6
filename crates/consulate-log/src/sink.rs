//! Sink capability and runtime-assembled sinks
//!
//! A sink exposes one entry point per severity. Statically typed sinks get
//! that for free from [`LogSink`]'s provided methods; sinks assembled at
//! runtime from a handler table are checked for completeness before the
//! facade accepts them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use consulate_common::{LogError, Result};

use crate::message::Context;
use crate::severity::Severity;

/// Destination for accepted log records.
///
/// Implementors only have to provide [`LogSink::log`]; the per-severity
/// methods forward to it and may be overridden individually.
pub trait LogSink: Send + Sync {
    fn log(&self, severity: Severity, message: &str, context: &Context) -> anyhow::Result<()>;

    fn emergency(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Emergency, message, context)
    }

    fn alert(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Alert, message, context)
    }

    fn critical(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Critical, message, context)
    }

    fn error(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Error, message, context)
    }

    fn warning(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Warning, message, context)
    }

    fn notice(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Notice, message, context)
    }

    fn info(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Info, message, context)
    }

    fn debug(&self, message: &str, context: &Context) -> anyhow::Result<()> {
        self.log(Severity::Debug, message, context)
    }
}

/// Call the entry point of `sink` named after `severity`.
pub(crate) fn dispatch(
    sink: &dyn LogSink,
    severity: Severity,
    message: &str,
    context: &Context,
) -> anyhow::Result<()> {
    match severity {
        Severity::Emergency => sink.emergency(message, context),
        Severity::Alert => sink.alert(message, context),
        Severity::Critical => sink.critical(message, context),
        Severity::Error => sink.error(message, context),
        Severity::Warning => sink.warning(message, context),
        Severity::Notice => sink.notice(message, context),
        Severity::Info => sink.info(message, context),
        Severity::Debug => sink.debug(message, context),
    }
}

/// A sink that invokes a closure.
pub struct FnLogSink<F>
where
    F: Fn(Severity, &str, &Context) -> anyhow::Result<()> + Send + Sync + 'static,
{
    f: F,
}

impl<F> FnLogSink<F>
where
    F: Fn(Severity, &str, &Context) -> anyhow::Result<()> + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> LogSink for FnLogSink<F>
where
    F: Fn(Severity, &str, &Context) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn log(&self, severity: Severity, message: &str, context: &Context) -> anyhow::Result<()> {
        (self.f)(severity, message, context)
    }
}

/// Handler for a single severity in a [`HandlerTable`].
pub type Handler = Arc<dyn Fn(&str, &Context) -> anyhow::Result<()> + Send + Sync>;

/// Unvalidated name → handler table describing a sink supplied at runtime.
///
/// Names are matched like severities (case, whitespace and `warn` are
/// tolerated). When a name appears twice the later handler wins.
#[derive(Clone)]
pub struct HandlerTable {
    name: String,
    entries: Vec<(String, Handler)>,
}

impl HandlerTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn on<F>(mut self, level: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str, &Context) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.entries.push((level.into(), Arc::new(handler)));
        self
    }

    /// Register the same handler under every severity name.
    pub fn on_all<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, &Context) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        for severity in Severity::ALL {
            self.entries
                .push((severity.as_str().to_string(), Arc::clone(&handler)));
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate the table into a sink.
    ///
    /// Fails with `InvalidInput` when a name is not a severity or when any of
    /// the eight severities has no handler.
    pub fn build(self) -> Result<HandlerSink> {
        let mut handlers = HashMap::with_capacity(Severity::ALL.len());
        for (level, handler) in self.entries {
            let severity = Severity::parse(&level).map_err(|_| {
                LogError::invalid_input(format!(
                    "{} is not a valid sink implementation: unknown handler \"{}\"",
                    self.name, level
                ))
            })?;
            handlers.insert(severity, handler);
        }

        let missing: Vec<&str> = Severity::ALL
            .iter()
            .filter(|severity| !handlers.contains_key(*severity))
            .map(|severity| severity.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(LogError::invalid_input(format!(
                "{} is not a valid sink implementation: missing handlers for [\"{}\"]",
                self.name,
                missing.join("\", \"")
            )));
        }

        Ok(HandlerSink {
            name: self.name,
            handlers,
        })
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("name", &self.name)
            .field(
                "levels",
                &self.entries.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A validated handler table: one handler per severity.
pub struct HandlerSink {
    name: String,
    handlers: HashMap<Severity, Handler>,
}

impl HandlerSink {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl LogSink for HandlerSink {
    fn log(&self, severity: Severity, message: &str, context: &Context) -> anyhow::Result<()> {
        match self.handlers.get(&severity) {
            Some(handler) => handler(message, context),
            None => Ok(()),
        }
    }
}

/// Anything the facade may be asked to register as a sink.
pub enum SinkCandidate {
    /// A statically typed sink; always valid.
    Sink(Arc<dyn LogSink>),
    /// A runtime handler table; validated on registration.
    Handlers(HandlerTable),
}

impl SinkCandidate {
    pub fn into_sink(self) -> Result<Arc<dyn LogSink>> {
        match self {
            SinkCandidate::Sink(sink) => Ok(sink),
            SinkCandidate::Handlers(table) => Ok(Arc::new(table.build()?)),
        }
    }
}

impl<S: LogSink + 'static> From<S> for SinkCandidate {
    fn from(sink: S) -> Self {
        SinkCandidate::Sink(Arc::new(sink))
    }
}

impl From<Arc<dyn LogSink>> for SinkCandidate {
    fn from(sink: Arc<dyn LogSink>) -> Self {
        SinkCandidate::Sink(sink)
    }
}

impl From<HandlerTable> for SinkCandidate {
    fn from(table: HandlerTable) -> Self {
        SinkCandidate::Handlers(table)
    }
}
