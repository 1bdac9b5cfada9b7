use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing_fanout::error::SinkError;
use tracing_fanout::init::LoggerBuilder;
use tracing_fanout::record::{EnrichedRecord, LogEvent};
use tracing_fanout::severity::Level;
use tracing_fanout::sink::LogSink;

/// Captures every record it receives, in emit order.
#[derive(Clone, Default)]
struct RecordingSink {
    records: Arc<Mutex<Vec<EnrichedRecord>>>,
}

impl RecordingSink {
    fn taken(&self) -> Vec<EnrichedRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn emit(&self, record: &EnrichedRecord) -> Result<(), SinkError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Fails every emit, for isolation tests.
#[derive(Clone, Default)]
struct FailingSink;

#[async_trait]
impl LogSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn emit(&self, _record: &EnrichedRecord) -> Result<(), SinkError> {
        Err(SinkError::Backend("synthetic failure".to_string()))
    }
}

#[tokio::test]
async fn failing_sink_does_not_affect_the_others() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .min_level(Level::Silly)
        .sink(Level::Silly, Arc::new(FailingSink))
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    logger.log(LogEvent::new(Level::Error, "still delivered"));
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message, "still delivered");
}

#[tokio::test]
async fn info_sink_filters_out_verbose_and_below() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .min_level(Level::Silly)
        .sink(Level::Info, Arc::new(recording.clone()))
        .build();

    logger.debug("dropped");
    logger.verbose("dropped");
    logger.silly("dropped");
    logger.info("kept");
    logger.http("kept");
    logger.warn("kept");
    logger.error("kept");
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.message == "kept"));
}

#[tokio::test]
async fn records_reach_a_sink_in_dispatch_order() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .min_level(Level::Silly)
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    for i in 0..100i64 {
        logger.log(LogEvent::new(Level::Info, "seq").with("seq", i));
    }
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 100);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.fields.get("seq"), Some(&json!(i as i64)));
    }
}

#[tokio::test]
async fn logger_minimum_level_gates_before_any_sink() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .min_level(Level::Warn)
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    logger.info("gated");
    logger.error("kept");
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, Level::Error);
}

#[tokio::test]
async fn service_default_rides_on_every_record() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .default_field("region", "eu-1")
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    logger.log(LogEvent::new(Level::Info, "hello").with("orderId", "o1"));
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records[0].fields.get("service"), Some(&json!("demo")));
    assert_eq!(records[0].fields.get("region"), Some(&json!("eu-1")));
    assert_eq!(records[0].fields.get("orderId"), Some(&json!("o1")));
    assert_eq!(records[0].trace, None);
}

#[tokio::test]
async fn file_sink_appends_json_lines_in_order() {
    let path = std::env::temp_dir().join(format!(
        "tracing-fanout-test-{}-{}.log",
        std::process::id(),
        unix_nanos()
    ));

    let logger = LoggerBuilder::new("demo")
        .file(Level::Silly, &path)
        .build();

    logger.log(LogEvent::new(Level::Info, "first").with("seq", 1));
    logger.log(LogEvent::new(Level::Warn, "second").with("seq", 2));
    logger.flush().await;

    let contents = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);

    assert_eq!(lines[0]["message"], "first");
    assert_eq!(lines[0]["level"], "info");
    assert_eq!(lines[0]["seq"], 1);
    assert_eq!(lines[1]["message"], "second");
    assert_eq!(lines[1]["level"], "warn");

    for line in &lines {
        assert_eq!(line["service"], "demo");
        assert!(line.get("timestamp").is_some());
        assert!(line.get("traceId").is_none());
    }
}

#[tokio::test]
async fn dropped_records_are_counted_not_raised() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    logger.info("one");
    logger.info("two");
    logger.flush().await;

    use std::sync::atomic::Ordering;
    assert_eq!(logger.dispatcher().dispatched.load(Ordering::Relaxed), 2);
    assert_eq!(logger.dispatcher().enqueued.load(Ordering::Relaxed), 2);
    assert_eq!(logger.dispatcher().dropped.load(Ordering::Relaxed), 0);
}

fn unix_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}
