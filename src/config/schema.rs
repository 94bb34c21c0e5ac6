//! Configuration schema definitions.
//!
//! `LoggingConfiguration` is the single value that gates every event
//! category. The remaining types describe how a logger built from a settings
//! file presents its output.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::config::validation::{interpret, ConfigWarning};

/// An event class that a configuration can selectively enable.
///
/// Slow-query events are deliberately absent: they are never gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Query,
    Error,
    Schema,
    Log,
    Info,
    Warn,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 6] = [
        Category::Query,
        Category::Error,
        Category::Schema,
        Category::Log,
        Category::Info,
        Category::Warn,
    ];

    /// The tag used for this category in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Query => "query",
            Category::Error => "error",
            Category::Schema => "schema",
            Category::Log => "log",
            Category::Info => "info",
            Category::Warn => "warn",
        }
    }

    /// Look up a category by its tag. Tags are matched exactly.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of categories, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySet {
    bits: u8,
}

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category) {
        self.bits |= category.bit();
    }

    pub fn contains(&self, category: Category) -> bool {
        self.bits & category.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        let mut set = CategorySet::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

/// Which event categories a logger emits.
///
/// Exactly one form is active. Note the asymmetry of `QueryAndErrorOnly`
/// (the legacy `true` value): it enables query and error events but not
/// schema notices or leveled messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingConfiguration {
    #[default]
    Disabled,
    All,
    QueryAndErrorOnly,
    Categories(CategorySet),
}

impl LoggingConfiguration {
    /// Build a `Categories` configuration from a list of categories.
    pub fn categories<I: IntoIterator<Item = Category>>(categories: I) -> Self {
        LoggingConfiguration::Categories(categories.into_iter().collect())
    }

    /// Whether this configuration enables `category`.
    pub fn permits(&self, category: Category) -> bool {
        match self {
            LoggingConfiguration::Disabled => false,
            LoggingConfiguration::All => true,
            LoggingConfiguration::QueryAndErrorOnly => {
                matches!(category, Category::Query | Category::Error)
            }
            LoggingConfiguration::Categories(set) => set.contains(category),
        }
    }

    /// Interpret an arbitrary configuration value, returning the warnings
    /// raised along the way. Never fails.
    pub fn from_value(value: serde_json::Value) -> (Self, Vec<ConfigWarning>) {
        interpret(value)
    }
}

impl<'de> Deserialize<'de> for LoggingConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any shape is accepted here; unusable shapes fall back to Disabled.
        let value = serde_json::Value::deserialize(deserializer)?;
        let (config, warnings) = LoggingConfiguration::from_value(value);
        for warning in &warnings {
            tracing::warn!(%warning, "Logging configuration adjusted");
        }
        Ok(config)
    }
}

impl Serialize for LoggingConfiguration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LoggingConfiguration::Disabled => serializer.serialize_bool(false),
            LoggingConfiguration::All => serializer.serialize_str("all"),
            LoggingConfiguration::QueryAndErrorOnly => serializer.serialize_bool(true),
            LoggingConfiguration::Categories(set) => {
                let mut seq = serializer.serialize_seq(None)?;
                for category in set.iter() {
                    seq.serialize_element(category.as_str())?;
                }
                seq.end()
            }
        }
    }
}

impl FromStr for LoggingConfiguration {
    type Err = Infallible;

    /// Parses the command-line form: `all`, `true`, `false`/`none`/empty, or
    /// a comma-separated list of tags. Unknown tags are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "all" => LoggingConfiguration::All,
            "true" => LoggingConfiguration::QueryAndErrorOnly,
            "" | "false" | "none" => LoggingConfiguration::Disabled,
            list => LoggingConfiguration::categories(
                list.split(',').filter_map(|tag| Category::from_tag(tag.trim())),
            ),
        })
    }
}

/// How event labels ("executing query", "error", ...) are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Labels are written as-is.
    #[default]
    Plain,
    /// Labels carry ANSI colour and underline escapes.
    Ansi,
}

/// Settings for the crate's own diagnostics.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Root settings for a logger loaded from a file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggerSettings {
    /// Which event categories are emitted.
    pub logging: LoggingConfiguration,

    /// Label decoration.
    pub markers: MarkerStyle,

    /// Diagnostics of the logger itself.
    pub observability: ObservabilityConfig,
}
