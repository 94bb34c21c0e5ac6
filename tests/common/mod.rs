//! Shared helpers for integration tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use query_logger::sink::CaptureSink;
use query_logger::{DiagnosticLogger, Level, Logger, LoggingConfiguration, Param};

/// A logger writing into a fresh capture sink.
pub fn capturing(config: LoggingConfiguration) -> (DiagnosticLogger, Arc<CaptureSink>) {
    let sink = Arc::new(CaptureSink::new());
    let logger = DiagnosticLogger::builder(config).sink(sink.clone()).build();
    (logger, sink)
}

/// Fire one event of every kind, in a fixed order, and return the number of
/// lines the sink saw for each kind.
#[allow(dead_code)]
pub fn fire_every_kind(logger: &DiagnosticLogger, sink: &CaptureSink) -> Vec<(&'static str, usize)> {
    let mut counts = Vec::new();
    let mut measure = |name: &'static str, f: &dyn Fn()| {
        let before = sink.lines().len();
        f();
        counts.push((name, sink.lines().len() - before));
    };

    measure("query", &|| logger.log_query("SELECT 1", None, None));
    measure("error", &|| logger.log_query_error("boom", "SELECT 1", None, None));
    measure("slow", &|| logger.log_query_slow(2000, "SELECT 1", None, None));
    measure("schema", &|| logger.log_schema_build("creating table t", None));
    measure("log", &|| logger.log(Level::Log, &Param::from("l"), None));
    measure("info", &|| logger.log(Level::Info, &Param::from("i"), None));
    measure("warn", &|| logger.log(Level::Warn, &Param::from("w"), None));

    counts
}

/// A parameter list whose second entry contains itself.
#[allow(dead_code)]
pub fn self_referencing_params() -> Vec<Param> {
    let cell = Rc::new(RefCell::new(Param::Null));
    *cell.borrow_mut() = Param::List(vec![Param::from("child"), Param::Shared(cell.clone())]);
    vec![Param::from(1), Param::Shared(cell)]
}
