//! Text composition for emitted events.
//!
//! # Output shapes
//! ```text
//! executed  executing query: <statement>
//! failed    query failed: <statement>
//!           error: <error text>
//! slow      query is slow: <statement>
//!           execution time: <elapsed>
//! schema    <message>
//! ```
//!
//! `<statement>` is the SQL, followed by ` -- PARAMETERS: ` and the rendered
//! parameters when there are any, passed through the highlighter as a whole.

use std::panic::{self, AssertUnwindSafe};

use colored::Colorize;

use crate::config::schema::MarkerStyle;
use crate::logger::event::Level;
use crate::logger::params::{render_params, render_payload, JsonEncoder, Param, ParamEncoder};

/// Separates the SQL text from its parameters.
pub const PARAMETERS_DELIMITER: &str = " -- PARAMETERS: ";

/// Turns SQL text into its display form.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, sql: &str) -> String;
}

impl<F> Highlighter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn highlight(&self, sql: &str) -> String {
        self(sql)
    }
}

/// Returns SQL unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, sql: &str) -> String {
        sql.to_string()
    }
}

#[derive(Debug, Clone, Copy)]
enum Label {
    Executing,
    Failed,
    ErrorText,
    Slow,
    ExecutionTime,
}

impl Label {
    fn text(self) -> &'static str {
        match self {
            Label::Executing => "executing query:",
            Label::Failed => "query failed:",
            Label::ErrorText => "error:",
            Label::Slow => "query is slow:",
            Label::ExecutionTime => "execution time:",
        }
    }
}

/// Builds display lines for events.
pub struct Formatter {
    highlighter: Box<dyn Highlighter>,
    encoder: Box<dyn ParamEncoder>,
    markers: MarkerStyle,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(
            Box::new(PlainHighlighter),
            Box::new(JsonEncoder),
            MarkerStyle::Plain,
        )
    }
}

impl Formatter {
    pub fn new(
        highlighter: Box<dyn Highlighter>,
        encoder: Box<dyn ParamEncoder>,
        markers: MarkerStyle,
    ) -> Self {
        Self {
            highlighter,
            encoder,
            markers,
        }
    }

    pub fn markers(&self) -> MarkerStyle {
        self.markers
    }

    /// SQL plus the parameter suffix, before highlighting.
    pub fn statement(&self, sql: &str, parameters: Option<&[Param]>) -> String {
        match parameters {
            Some(params) if !params.is_empty() => {
                let rendered = render_params(self.encoder.as_ref(), params);
                format!("{}{}{}", sql, PARAMETERS_DELIMITER, rendered)
            }
            _ => sql.to_string(),
        }
    }

    fn highlighted(&self, sql: &str, parameters: Option<&[Param]>) -> String {
        let statement = self.statement(sql, parameters);
        // A misbehaving highlighter must not take the log call down with it.
        match panic::catch_unwind(AssertUnwindSafe(|| self.highlighter.highlight(&statement))) {
            Ok(text) => text,
            Err(_) => {
                tracing::debug!("Highlighter panicked; using plain SQL");
                statement
            }
        }
    }

    fn label(&self, label: Label) -> String {
        let text = label.text();
        match self.markers {
            MarkerStyle::Plain => text.to_string(),
            MarkerStyle::Ansi => match label {
                Label::Executing => text.dimmed().underline().to_string(),
                Label::Failed | Label::ErrorText => text.red().underline().to_string(),
                Label::Slow | Label::ExecutionTime => text.yellow().underline().to_string(),
            },
        }
    }

    fn emphasis(&self, text: String) -> String {
        match self.markers {
            MarkerStyle::Plain => text,
            MarkerStyle::Ansi => text.bold().to_string(),
        }
    }

    pub fn executed(&self, sql: &str, parameters: Option<&[Param]>) -> Vec<String> {
        vec![format!(
            "{} {}",
            self.label(Label::Executing),
            self.highlighted(sql, parameters)
        )]
    }

    pub fn failed(&self, sql: &str, parameters: Option<&[Param]>, error: &str) -> Vec<String> {
        vec![
            format!(
                "{} {}",
                self.label(Label::Failed),
                self.emphasis(self.highlighted(sql, parameters))
            ),
            format!("{} {}", self.label(Label::ErrorText), error),
        ]
    }

    pub fn slow(&self, sql: &str, parameters: Option<&[Param]>, elapsed_millis: u64) -> Vec<String> {
        vec![
            format!(
                "{} {}",
                self.label(Label::Slow),
                self.emphasis(self.highlighted(sql, parameters))
            ),
            format!("{} {}", self.label(Label::ExecutionTime), elapsed_millis),
        ]
    }

    pub fn schema(&self, message: &str) -> Vec<String> {
        let line = match self.markers {
            MarkerStyle::Plain => message.to_string(),
            MarkerStyle::Ansi => message.underline().to_string(),
        };
        vec![line]
    }

    pub fn leveled(&self, level: Level, payload: &Param) -> Vec<String> {
        let text = render_payload(payload);
        let line = match (self.markers, level) {
            (MarkerStyle::Ansi, Level::Warn) => text.yellow().to_string(),
            _ => text,
        };
        vec![line]
    }
}
