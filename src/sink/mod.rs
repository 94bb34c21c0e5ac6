//! Output sinks.
//!
//! # Data Flow
//! ```text
//! DiagnosticLogger
//!     → one Sink::write call per emitted event (all of its lines)
//!     → console.rs (stdout / stderr)
//!     → capture.rs (in-memory, for tests and embedding)
//!     → tracing.rs (forward to the active tracing subscriber)
//! ```
//!
//! # Design Decisions
//! - A sink receives every line of an event in one call and must keep them
//!   together when several threads log at once
//! - Sinks never report errors back to the logger

pub mod capture;
pub mod console;
pub mod tracing;

pub use self::capture::{CaptureSink, Record};
pub use self::console::ConsoleSink;
pub use self::tracing::TracingSink;

/// Output channel selected for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Primary output: executed and slow queries, schema notices, `log` messages.
    Standard,
    /// Informational output: `info` messages.
    Info,
    /// Warning output: `warn` messages.
    Warning,
    /// Error output: failed queries.
    Error,
}

/// Destination for finished text lines.
pub trait Sink: Send + Sync {
    /// Write all `lines` of one event to `channel` as a contiguous unit.
    fn write(&self, channel: Channel, lines: &[String]);
}
