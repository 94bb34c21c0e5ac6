//! Output text through the public logger API.

use query_logger::logger::{EventKind, PARAMETERS_DELIMITER};
use query_logger::sink::Channel;
use query_logger::{Level, LogEvent, Logger, LoggingConfiguration, Param};

mod common;

#[test]
fn test_parameters_round_trip() {
    let (logger, sink) = common::capturing(LoggingConfiguration::All);
    logger.log_query(
        "SELECT * FROM users WHERE id = $1 AND name = $2",
        Some(&[Param::from(1), Param::from("a")]),
        None,
    );

    let lines = sink.lines();
    let (head, encoded) = lines[0].split_once(PARAMETERS_DELIMITER).unwrap();
    assert_eq!(head, "executing query: SELECT * FROM users WHERE id = $1 AND name = $2");

    let decoded: serde_json::Value = serde_json::from_str(encoded).unwrap();
    assert_eq!(decoded, serde_json::json!([1, "a"]));
}

#[test]
fn test_empty_parameters_have_no_suffix() {
    let (logger, sink) = common::capturing(LoggingConfiguration::All);
    logger.log_query("SELECT 1", Some(&[]), None);
    assert_eq!(sink.lines(), vec!["executing query: SELECT 1"]);
}

#[test]
fn test_cyclic_parameters_fall_back_to_raw_value() {
    let (logger, sink) = common::capturing(LoggingConfiguration::All);
    let params = common::self_referencing_params();

    logger.log_query("INSERT INTO t VALUES ($1, $2)", Some(&params), None);
    logger.log_query_error("constraint", "INSERT INTO t VALUES ($1, $2)", Some(&params), None);
    logger.log_query_slow(900, "INSERT INTO t VALUES ($1, $2)", Some(&params), None);

    let lines = sink.lines();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        r#"executing query: INSERT INTO t VALUES ($1, $2) -- PARAMETERS: [1, ["child", [Circular]]]"#
    );
    assert!(lines[1].ends_with(r#"[1, ["child", [Circular]]]"#));
    assert_eq!(lines[2], "error: constraint");
    assert_eq!(lines[4], "execution time: 900");
}

#[test]
fn test_slow_event_shape() {
    let (logger, sink) = common::capturing(LoggingConfiguration::Disabled);
    logger.handle(
        &LogEvent::QuerySlow {
            sql: "SELECT pg_sleep(2)".into(),
            parameters: None,
            elapsed_millis: 2004,
        },
        None,
    );

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].channel, Channel::Standard);
    assert_eq!(
        records[0].lines,
        vec!["query is slow: SELECT pg_sleep(2)", "execution time: 2004"]
    );
}

#[test]
fn test_failed_event_goes_to_error_channel() {
    let (logger, sink) = common::capturing(LoggingConfiguration::QueryAndErrorOnly);
    logger.log_query_error("relation \"t\" does not exist", "SELECT * FROM t", None, None);

    assert_eq!(
        sink.lines_on(Channel::Error),
        vec!["query failed: SELECT * FROM t", "error: relation \"t\" does not exist"]
    );
}

#[test]
fn test_leveled_payloads() {
    let (logger, sink) = common::capturing(LoggingConfiguration::All);
    logger.log(Level::Warn, &Param::from("pool exhausted"), None);
    logger.log(
        Level::Info,
        &Param::from(serde_json::json!({"open": 3, "idle": 1})),
        None,
    );

    assert_eq!(sink.lines_on(Channel::Warning), vec!["pool exhausted"]);
    assert_eq!(sink.lines_on(Channel::Info), vec![r#"{"idle":1,"open":3}"#]);
}

#[test]
fn test_leveled_payload_is_valid_json() {
    let (logger, sink) = common::capturing(LoggingConfiguration::All);
    logger.log(
        Level::Info,
        &Param::from(vec![Param::from("tab\u{1}x"), Param::from(vec![1u8, 2, 3])]),
        None,
    );

    let lines = sink.lines_on(Channel::Info);
    assert_eq!(lines, vec![r#"["tab\u0001x",[1,2,3]]"#]);
    let decoded: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(decoded, serde_json::json!(["tab\u{1}x", [1, 2, 3]]));
}

#[test]
fn test_identical_events_give_identical_text() {
    let (logger, sink) = common::capturing(LoggingConfiguration::All);
    let event = LogEvent::QueryExecuted {
        sql: "SELECT $1".into(),
        parameters: Some(vec![Param::from(42)]),
    };

    logger.handle(&event, None);
    logger.handle(&event, None);

    let records = sink.records();
    assert_eq!(records[0], records[1]);
    assert!(logger.is_enabled(EventKind::Slow));
}

#[test]
fn test_highlighter_output_used_verbatim() {
    let sink = std::sync::Arc::new(query_logger::sink::CaptureSink::new());
    let logger = query_logger::DiagnosticLogger::builder(LoggingConfiguration::All)
        .highlighter(|sql: &str| sql.replace("SELECT", "\u{1b}[34mSELECT\u{1b}[0m"))
        .sink(sink.clone())
        .build();

    logger.log_query("SELECT 1", None, None);
    assert_eq!(
        sink.lines(),
        vec!["executing query: \u{1b}[34mSELECT\u{1b}[0m 1"]
    );
}
