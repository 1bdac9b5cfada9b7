use async_trait::async_trait;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing_fanout::error::SinkError;
use tracing_fanout::init::LoggerBuilder;
use tracing_fanout::layer::FanoutLayer;
use tracing_fanout::record::EnrichedRecord;
use tracing_fanout::severity::Level;
use tracing_fanout::sink::LogSink;
use tracing_subscriber::layer::SubscriberExt;

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

#[tokio::test]
async fn tracing_events_flow_through_the_logger() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .min_level(Level::Silly)
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    let subscriber =
        tracing_subscriber::registry().with(FanoutLayer::new(logger.clone()));
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(order_id = "o1", attempt = 2u64, "Order created");
        tracing::trace!("very chatty");
    });
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].message, "Order created");
    assert_eq!(records[0].fields.get("order_id"), Some(&json!("o1")));
    assert_eq!(records[0].fields.get("attempt"), Some(&json!(2)));
    assert_eq!(records[0].fields.get("service"), Some(&json!("demo")));
    assert_eq!(records[0].trace, None);

    // tracing's TRACE maps onto the least severe tier.
    assert_eq!(records[1].level, Level::Silly);
}

#[tokio::test]
async fn events_inside_a_span_carry_its_trace_identity() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .min_level(Level::Silly)
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    let provider = SdkTracerProvider::builder().build();
    let tracer = provider.tracer("layer-test");
    let subscriber = tracing_subscriber::registry()
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(FanoutLayer::new(logger.clone()));

    tracing::subscriber::with_default(subscriber, || {
        let span = tracing::info_span!("get-user-details");
        let _guard = span.enter();
        tracing::info!(user_id = "u1", "Fetching user details");
    });
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 1);

    let trace = records[0].trace.as_ref().expect("trace context attached");
    assert_eq!(trace.trace_id.len(), 32);
    assert_eq!(trace.span_id.len(), 16);
    assert!(trace.trace_id.chars().all(|c| c.is_ascii_hexdigit()));
    assert!(trace.span_id.chars().all(|c| c.is_ascii_hexdigit()));

    // Callers cannot smuggle correlation fields past the enricher.
    assert!(!records[0].fields.contains_key("traceId"));
    assert!(!records[0].fields.contains_key("spanId"));
}

#[tokio::test]
async fn events_outside_any_span_have_no_correlation() {
    let recording = RecordingSink::default();
    let logger = LoggerBuilder::new("demo")
        .sink(Level::Silly, Arc::new(recording.clone()))
        .build();

    let subscriber =
        tracing_subscriber::registry().with(FanoutLayer::new(logger.clone()));
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!("low disk");
    });
    logger.flush().await;

    let records = recording.taken();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].trace, None);
}
