use crate::error::SinkError;
use crate::record::{EnrichedRecord, TraceContext};
use crate::severity::{map_severity, SeverityNumber};
use crate::sink::LogSink;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The shape handed to a telemetry backend: OpenTelemetry-style severity
/// pair, body, flat attributes and an optional trace binding.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    pub timestamp: DateTime<Utc>,
    pub severity_number: SeverityNumber,
    pub severity_text: String,
    pub body: String,
    pub attributes: BTreeMap<String, Value>,
    pub trace: Option<TraceContext>,
}

/// Transport boundary for the remote backend.
///
/// Implementations own batching, serialization and network delivery; the
/// logging core only requires that `emit` be async so the sink worker,
/// never the log call site, carries any waiting.
#[async_trait]
pub trait TelemetryEmitter: Send + Sync {
    async fn emit(&self, record: &TelemetryRecord) -> Result<(), SinkError>;

    /// Flush any locally buffered records. Default is a no-op.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Remote sink: maps enriched records onto [`TelemetryRecord`]s and hands
/// them to the configured emitter.
pub struct RemoteSink {
    emitter: Arc<dyn TelemetryEmitter>,
}

impl RemoteSink {
    pub fn new(emitter: Arc<dyn TelemetryEmitter>) -> Self {
        RemoteSink { emitter }
    }

    fn map_record(&self, record: &EnrichedRecord) -> TelemetryRecord {
        TelemetryRecord {
            timestamp: record.timestamp,
            severity_number: map_severity(record.level),
            severity_text: record.level.as_str().to_uppercase(),
            body: record.message.clone(),
            attributes: record.fields.clone(),
            trace: record.trace.clone(),
        }
    }
}

#[async_trait]
impl LogSink for RemoteSink {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn emit(&self, record: &EnrichedRecord) -> Result<(), SinkError> {
        self.emitter.emit(&self.map_record(record)).await
    }

    async fn flush(&self) -> Result<(), SinkError> {
        self.emitter.flush().await
    }
}
