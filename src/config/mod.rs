//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (interpret the logging value, collect warnings)
//!     → LoggerSettings (immutable)
//!     → handed to DiagnosticLogger at construction
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal files
//! - A malformed logging value disables logging instead of failing the load

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, ConfigError};
pub use schema::{Category, CategorySet, LoggerSettings, LoggingConfiguration, MarkerStyle};
pub use validation::ConfigWarning;
