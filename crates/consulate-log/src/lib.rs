//! Consulate Log - level-gated, multi-sink logging facade
//!
//! This crate provides:
//! - `Severity`: the eight ordered log levels and their normalization
//! - `LogFacade`: threshold filtering and fan-out to registered sinks
//! - `LogSink` and the built-in sinks (file, tracing bridge, closure, handler table)
//! - `LoggingConfig`: configuration from TOML or environment variables
//! - `global`: an optional process-wide facade with free functions
//!
//! # Example
//!
//! ```
//! use consulate_log::{Context, FnLogSink, LogFacade};
//!
//! let mut facade = LogFacade::new();
//! facade
//!     .add_sink(FnLogSink::new(|severity, message, _context| {
//!         println!("[{severity}] {message}");
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! facade.info("filtered out at the default threshold").unwrap();
//! facade.warning("catalog sync lagging").unwrap();
//! facade.log("ERROR", "deregistration failed", &Context::new()).unwrap();
//! ```

mod macros;

pub mod config;
pub mod facade;
pub mod file_sink;
pub mod global;
pub mod message;
pub mod severity;
pub mod sink;
pub mod tracing_sink;

// Re-exports for convenience
pub use config::LoggingConfig;
pub use consulate_common::{DEFAULT_LOG_FILE, LogError, Result};
pub use facade::LogFacade;
pub use file_sink::{FileSink, LogRotation};
pub use message::{Context, LogMessage};
pub use severity::Severity;
pub use sink::{FnLogSink, Handler, HandlerSink, HandlerTable, LogSink, SinkCandidate};
pub use tracing_sink::TracingSink;
