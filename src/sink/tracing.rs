//! Forwarding to `tracing`.

use crate::sink::{Channel, Sink};

/// Emits each event as a single `tracing` event under the
/// `query_logger::output` target, at a level chosen by channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn write(&self, channel: Channel, lines: &[String]) {
        let message = lines.join("\n");
        match channel {
            Channel::Standard | Channel::Info => {
                tracing::info!(target: "query_logger::output", "{}", message)
            }
            Channel::Warning => tracing::warn!(target: "query_logger::output", "{}", message),
            Channel::Error => tracing::error!(target: "query_logger::output", "{}", message),
        }
    }
}
