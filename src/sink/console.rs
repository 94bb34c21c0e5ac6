//! Process standard streams.

use std::io::{self, Write};

use crate::sink::{Channel, Sink};

/// Writes `Standard` and `Info` to stdout, `Warning` and `Error` to stderr.
///
/// The stream lock is held for all lines of an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    fn write_lines<W: Write>(mut out: W, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, channel: Channel, lines: &[String]) {
        let result = match channel {
            Channel::Standard | Channel::Info => Self::write_lines(io::stdout().lock(), lines),
            Channel::Warning | Channel::Error => Self::write_lines(io::stderr().lock(), lines),
        };

        if let Err(e) = result {
            tracing::trace!(?channel, error = %e, "Console write failed");
        }
    }
}
