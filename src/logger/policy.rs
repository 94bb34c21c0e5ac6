//! Emit/suppress decisions.
//!
//! | Event kind          | Emits when                                     |
//! |---------------------|------------------------------------------------|
//! | query               | `All`, `QueryAndErrorOnly`, or set has `query` |
//! | error               | `All`, `QueryAndErrorOnly`, or set has `error` |
//! | slow                | always                                         |
//! | schema              | `All` or set has `schema`                      |
//! | log / info / warn   | `All` or set has the matching tag              |

use crate::config::schema::{Category, LoggingConfiguration};
use crate::logger::event::{Level, LogEvent};

/// The kind of an event, as far as gating is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Query,
    Error,
    Slow,
    Schema,
    Log,
    Info,
    Warn,
}

impl EventKind {
    /// The configurable category behind this kind. Slow queries have none.
    pub fn category(self) -> Option<Category> {
        match self {
            EventKind::Query => Some(Category::Query),
            EventKind::Error => Some(Category::Error),
            EventKind::Slow => None,
            EventKind::Schema => Some(Category::Schema),
            EventKind::Log => Some(Category::Log),
            EventKind::Info => Some(Category::Info),
            EventKind::Warn => Some(Category::Warn),
        }
    }
}

impl From<Level> for EventKind {
    fn from(level: Level) -> Self {
        match level {
            Level::Log => EventKind::Log,
            Level::Info => EventKind::Info,
            Level::Warn => EventKind::Warn,
        }
    }
}

impl From<&LogEvent> for EventKind {
    fn from(event: &LogEvent) -> Self {
        match event {
            LogEvent::QueryExecuted { .. } => EventKind::Query,
            LogEvent::QueryFailed { .. } => EventKind::Error,
            LogEvent::QuerySlow { .. } => EventKind::Slow,
            LogEvent::SchemaNotice { .. } => EventKind::Schema,
            LogEvent::LeveledMessage { level, .. } => EventKind::from(*level),
        }
    }
}

/// Whether `config` lets an event of `kind` through.
pub fn should_emit(config: &LoggingConfiguration, kind: EventKind) -> bool {
    match kind.category() {
        Some(category) => config.permits(category),
        // Slow queries are never silenced.
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::CategorySet;

    const KINDS: [EventKind; 7] = [
        EventKind::Query,
        EventKind::Error,
        EventKind::Slow,
        EventKind::Schema,
        EventKind::Log,
        EventKind::Info,
        EventKind::Warn,
    ];

    fn emitted(config: LoggingConfiguration) -> Vec<EventKind> {
        KINDS.into_iter().filter(|k| should_emit(&config, *k)).collect()
    }

    #[test]
    fn test_disabled_only_slow() {
        assert_eq!(emitted(LoggingConfiguration::Disabled), vec![EventKind::Slow]);
        assert_eq!(
            emitted(LoggingConfiguration::Categories(CategorySet::new())),
            vec![EventKind::Slow]
        );
    }

    #[test]
    fn test_all_emits_everything() {
        assert_eq!(emitted(LoggingConfiguration::All), KINDS.to_vec());
    }

    #[test]
    fn test_legacy_true_is_query_and_error() {
        assert_eq!(
            emitted(LoggingConfiguration::QueryAndErrorOnly),
            vec![EventKind::Query, EventKind::Error, EventKind::Slow]
        );
    }

    #[test]
    fn test_category_set() {
        assert_eq!(
            emitted(LoggingConfiguration::categories([Category::Warn])),
            vec![EventKind::Slow, EventKind::Warn]
        );
        assert_eq!(
            emitted(LoggingConfiguration::categories([Category::Schema, Category::Error])),
            vec![EventKind::Error, EventKind::Slow, EventKind::Schema]
        );
    }

    #[test]
    fn test_event_kind_of_leveled_message() {
        let event = LogEvent::LeveledMessage {
            level: Level::Info,
            payload: "hello".into(),
        };
        assert_eq!(EventKind::from(&event), EventKind::Info);
    }
}
