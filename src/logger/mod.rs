//! Diagnostic logger for the data-access layer.
//!
//! # Data Flow
//! ```text
//! executor call / LogEvent
//!     → policy.rs (emit or suppress, by LoggingConfiguration)
//!     → format.rs (statement, parameters, highlighting, labels)
//!     → Sink (one write per event)
//! ```
//!
//! # Design Decisions
//! - Configuration is fixed at construction
//! - No call returns an error or panics; parameter encoding failures fall
//!   back to the raw rendering
//! - Calls are independent: no counters, timestamps or other cross-call state

pub mod event;
pub mod format;
pub mod params;
pub mod policy;

use std::sync::Arc;

use crate::config::schema::{LoggerSettings, LoggingConfiguration, MarkerStyle};
use crate::sink::{Channel, ConsoleSink, Sink};

pub use event::{ExecutionContext, Level, LogEvent};
pub use format::{Formatter, Highlighter, PlainHighlighter, PARAMETERS_DELIMITER};
pub use params::{JsonEncoder, Param, ParamEncoder, RenderedParams, SerializationError};
pub use policy::{should_emit, EventKind};

/// The calls a data-access executor makes while running queries.
pub trait Logger {
    /// A query is about to run.
    fn log_query(&self, sql: &str, parameters: Option<&[Param]>, ctx: Option<&ExecutionContext>);

    /// A query failed.
    fn log_query_error(
        &self,
        error: &str,
        sql: &str,
        parameters: Option<&[Param]>,
        ctx: Option<&ExecutionContext>,
    );

    /// A query took longer than the executor's threshold.
    fn log_query_slow(
        &self,
        elapsed_millis: u64,
        sql: &str,
        parameters: Option<&[Param]>,
        ctx: Option<&ExecutionContext>,
    );

    /// A schema build step.
    fn log_schema_build(&self, message: &str, ctx: Option<&ExecutionContext>);

    /// A generic message.
    fn log(&self, level: Level, payload: &Param, ctx: Option<&ExecutionContext>);
}

/// Gates events by configuration and writes the survivors to a sink.
pub struct DiagnosticLogger {
    config: LoggingConfiguration,
    formatter: Formatter,
    sink: Arc<dyn Sink>,
}

impl DiagnosticLogger {
    /// Console output, no highlighting, JSON parameters, plain labels.
    pub fn new(config: LoggingConfiguration) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: LoggingConfiguration) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    /// Logger for loaded settings, writing to the console.
    pub fn from_settings(settings: &LoggerSettings) -> Self {
        Self::builder(settings.logging)
            .markers(settings.markers)
            .build()
    }

    pub fn config(&self) -> &LoggingConfiguration {
        &self.config
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn is_enabled(&self, kind: EventKind) -> bool {
        should_emit(&self.config, kind)
    }

    /// Dispatch an event to the matching `Logger` call.
    pub fn handle(&self, event: &LogEvent, ctx: Option<&ExecutionContext>) {
        match event {
            LogEvent::QueryExecuted { sql, parameters } => {
                self.log_query(sql, parameters.as_deref(), ctx)
            }
            LogEvent::QueryFailed {
                sql,
                parameters,
                error,
            } => self.log_query_error(error, sql, parameters.as_deref(), ctx),
            LogEvent::QuerySlow {
                sql,
                parameters,
                elapsed_millis,
            } => self.log_query_slow(*elapsed_millis, sql, parameters.as_deref(), ctx),
            LogEvent::SchemaNotice { message } => self.log_schema_build(message, ctx),
            LogEvent::LeveledMessage { level, payload } => self.log(*level, payload, ctx),
        }
    }

    fn gate(&self, kind: EventKind) -> bool {
        let enabled = self.is_enabled(kind);
        if !enabled {
            tracing::trace!(?kind, config = ?self.config, "Event suppressed");
        }
        enabled
    }
}

impl Logger for DiagnosticLogger {
    fn log_query(&self, sql: &str, parameters: Option<&[Param]>, _ctx: Option<&ExecutionContext>) {
        if self.gate(EventKind::Query) {
            self.sink
                .write(Channel::Standard, &self.formatter.executed(sql, parameters));
        }
    }

    fn log_query_error(
        &self,
        error: &str,
        sql: &str,
        parameters: Option<&[Param]>,
        _ctx: Option<&ExecutionContext>,
    ) {
        if self.gate(EventKind::Error) {
            self.sink
                .write(Channel::Error, &self.formatter.failed(sql, parameters, error));
        }
    }

    fn log_query_slow(
        &self,
        elapsed_millis: u64,
        sql: &str,
        parameters: Option<&[Param]>,
        _ctx: Option<&ExecutionContext>,
    ) {
        if self.gate(EventKind::Slow) {
            self.sink.write(
                Channel::Standard,
                &self.formatter.slow(sql, parameters, elapsed_millis),
            );
        }
    }

    fn log_schema_build(&self, message: &str, _ctx: Option<&ExecutionContext>) {
        if self.gate(EventKind::Schema) {
            self.sink
                .write(Channel::Standard, &self.formatter.schema(message));
        }
    }

    fn log(&self, level: Level, payload: &Param, _ctx: Option<&ExecutionContext>) {
        if self.gate(EventKind::from(level)) {
            let channel = match level {
                Level::Log => Channel::Standard,
                Level::Info => Channel::Info,
                Level::Warn => Channel::Warning,
            };
            self.sink.write(channel, &self.formatter.leveled(level, payload));
        }
    }
}

/// Assembles a `DiagnosticLogger` from its collaborators.
pub struct LoggerBuilder {
    config: LoggingConfiguration,
    sink: Arc<dyn Sink>,
    highlighter: Box<dyn Highlighter>,
    encoder: Box<dyn ParamEncoder>,
    markers: MarkerStyle,
}

impl LoggerBuilder {
    pub fn new(config: LoggingConfiguration) -> Self {
        Self {
            config,
            sink: Arc::new(ConsoleSink),
            highlighter: Box::new(PlainHighlighter),
            encoder: Box::new(JsonEncoder),
            markers: MarkerStyle::Plain,
        }
    }

    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub fn encoder(mut self, encoder: impl ParamEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn markers(mut self, markers: MarkerStyle) -> Self {
        self.markers = markers;
        self
    }

    pub fn build(self) -> DiagnosticLogger {
        DiagnosticLogger {
            config: self.config,
            formatter: Formatter::new(self.highlighter, self.encoder, self.markers),
            sink: self.sink,
        }
    }
}
