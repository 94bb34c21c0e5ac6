//! Diagnostic query logger for a data-access layer.
//!
//! A [`DiagnosticLogger`] receives query lifecycle events from an executor,
//! decides per event whether the configured [`LoggingConfiguration`] lets it
//! through, and writes readable lines to a [`Sink`](sink::Sink).

pub mod config;
pub mod logger;
pub mod observability;
pub mod sink;

pub use config::schema::{Category, LoggerSettings, LoggingConfiguration};
pub use logger::{DiagnosticLogger, ExecutionContext, Level, LogEvent, Logger, Param};
