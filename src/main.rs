//! Query log replay.
//!
//! Reads newline-delimited JSON events and runs them through a
//! `DiagnosticLogger`, so a logging configuration can be tried against
//! captured executor traffic.
//!
//! ```text
//! {"kind":"query_executed","sql":"SELECT 1","parameters":[1,"a"]}
//! {"kind":"query_failed","sql":"SELECT x","error":"no such column: x"}
//! {"kind":"query_slow","sql":"SELECT pg_sleep(2)","elapsed_millis":2004}
//! {"kind":"schema_notice","message":"creating table users"}
//! {"kind":"leveled_message","level":"warn","payload":"pool exhausted"}
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use query_logger::config::{load_settings, LoggerSettings, LoggingConfiguration, MarkerStyle};
use query_logger::observability::logging::init_tracing;
use query_logger::sink::{ConsoleSink, Sink, TracingSink};
use query_logger::{DiagnosticLogger, ExecutionContext, LogEvent};

#[derive(Parser)]
#[command(name = "query-logger")]
#[command(about = "Replay query events through the diagnostic logger", long_about = None)]
struct Cli {
    /// Settings file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the logging value: all, true, false, or a list such as query,error.
    #[arg(short, long)]
    logging: Option<LoggingConfiguration>,

    /// Decorate labels with ANSI escapes.
    #[arg(long)]
    ansi: bool,

    /// Send output through tracing instead of stdout/stderr.
    #[arg(long)]
    via_tracing: bool,

    /// Print the effective settings and exit.
    #[arg(long)]
    show_config: bool,

    /// Event file; stdin when absent.
    input: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => LoggerSettings::default(),
    };
    if let Some(logging) = cli.logging {
        settings.logging = logging;
    }
    if cli.ansi {
        settings.markers = MarkerStyle::Ansi;
    }

    init_tracing(&settings.observability.log_level);

    if cli.show_config {
        print!("{}", toml::to_string(&settings)?);
        return Ok(());
    }

    tracing::info!(
        logging = ?settings.logging,
        markers = ?settings.markers,
        "Replay starting"
    );

    let sink: Arc<dyn Sink> = if cli.via_tracing {
        Arc::new(TracingSink)
    } else {
        Arc::new(ConsoleSink)
    };
    let logger = DiagnosticLogger::builder(settings.logging)
        .markers(settings.markers)
        .sink(sink)
        .build();

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let ctx = ExecutionContext::new();
    let mut replayed = 0usize;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<LogEvent>(&line) {
            Ok(event) => {
                logger.handle(&event, Some(&ctx));
                replayed += 1;
            }
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed event");
                skipped += 1;
            }
        }
    }

    tracing::info!(replayed, skipped, context = %ctx, "Replay complete");
    Ok(())
}
