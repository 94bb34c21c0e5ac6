//! Events delivered by the data-access executor.

use std::fmt;

use serde::Deserialize;
use uuid::Uuid;

use crate::logger::params::Param;

/// Severity of a generic leveled message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Log,
    Info,
    Warn,
}

/// One logger call's worth of data.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEvent {
    QueryExecuted {
        sql: String,
        #[serde(default)]
        parameters: Option<Vec<Param>>,
    },
    QueryFailed {
        sql: String,
        #[serde(default)]
        parameters: Option<Vec<Param>>,
        error: String,
    },
    QuerySlow {
        sql: String,
        #[serde(default)]
        parameters: Option<Vec<Param>>,
        elapsed_millis: u64,
    },
    SchemaNotice {
        message: String,
    },
    LeveledMessage {
        level: Level,
        payload: Param,
    },
}

/// Identifies the connection or transaction an event came from.
///
/// The logger accepts it with every call but never looks inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecutionContext {
    id: Uuid,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn with_id(id: Uuid) -> Self {
        Self { id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.id)
    }
}
