//! Interpretation of raw logging configuration values.
//!
//! # Responsibilities
//! - Map the accepted shapes (`bool`, `"all"`, array of tags) onto
//!   `LoggingConfiguration`
//! - Report, but never reject, anything that does not fit
//!
//! # Design Decisions
//! - Unknown tags inside an array are dropped; the other tags still apply
//! - An unusable shape as a whole means nothing is enabled
//! - Interpretation is a pure function: Value → (LoggingConfiguration, Vec<ConfigWarning>)

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::{Category, CategorySet, LoggingConfiguration};

/// A problem found while interpreting a configuration value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigWarning {
    /// A tag in the category list names no known category.
    #[error("unknown logging category '{0}' ignored")]
    UnknownCategory(String),

    /// A category list contained something other than a string.
    #[error("non-string logging category {0} ignored")]
    NonStringEntry(Value),

    /// The value as a whole has no meaning; logging is disabled.
    #[error("unrecognized logging configuration {0}; logging disabled")]
    UnrecognizedShape(Value),
}

/// Interpret a raw configuration value.
pub fn interpret(value: Value) -> (LoggingConfiguration, Vec<ConfigWarning>) {
    let mut warnings = Vec::new();

    let config = match value {
        Value::Bool(false) | Value::Null => LoggingConfiguration::Disabled,
        Value::Bool(true) => LoggingConfiguration::QueryAndErrorOnly,
        Value::String(ref s) if s == "all" => LoggingConfiguration::All,
        Value::Array(entries) => {
            let mut set = CategorySet::new();
            for entry in entries {
                match entry {
                    Value::String(tag) => match Category::from_tag(&tag) {
                        Some(category) => set.insert(category),
                        None => warnings.push(ConfigWarning::UnknownCategory(tag)),
                    },
                    other => warnings.push(ConfigWarning::NonStringEntry(other)),
                }
            }
            LoggingConfiguration::Categories(set)
        }
        other => {
            warnings.push(ConfigWarning::UnrecognizedShape(other));
            LoggingConfiguration::Disabled
        }
    };

    (config, warnings)
}
