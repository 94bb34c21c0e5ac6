//! In-memory sink.

use std::sync::{Mutex, MutexGuard};

use crate::sink::{Channel, Sink};

/// Everything one event wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub channel: Channel,
    pub lines: Vec<String>,
}

/// Keeps every write in order.
#[derive(Debug, Default)]
pub struct CaptureSink {
    records: Mutex<Vec<Record>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere must not make the captured output unreachable.
    fn guard(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// One record per emitted event.
    pub fn records(&self) -> Vec<Record> {
        self.guard().clone()
    }

    /// All lines, flattened across events.
    pub fn lines(&self) -> Vec<String> {
        self.guard()
            .iter()
            .flat_map(|record| record.lines.iter().cloned())
            .collect()
    }

    /// Lines written to `channel`.
    pub fn lines_on(&self, channel: Channel) -> Vec<String> {
        self.guard()
            .iter()
            .filter(|record| record.channel == channel)
            .flat_map(|record| record.lines.iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl Sink for CaptureSink {
    fn write(&self, channel: Channel, lines: &[String]) {
        self.guard().push(Record {
            channel,
            lines: lines.to_vec(),
        });
    }
}
