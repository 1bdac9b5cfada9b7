use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::severity::Level;

/// A structured log event as produced at a call site, before enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
    pub fields: BTreeMap<String, Value>,
    /// Set only when the caller carries its own timestamp; otherwise the
    /// enricher stamps the record with the current wall clock.
    pub timestamp: Option<DateTime<Utc>>,
}

impl LogEvent {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        LogEvent {
            level,
            message: message.into(),
            fields: BTreeMap::new(),
            timestamp: None,
        }
    }

    /// Attach a structured field to the event.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Point-in-time snapshot of the active span identity.
///
/// Owned by the tracing subsystem; the logging core only copies it into a
/// single enriched record and never writes it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceContext {
    /// 32-char lowercase hex trace id.
    #[serde(rename = "traceId")]
    pub trace_id: String,
    /// 16-char lowercase hex span id.
    #[serde(rename = "spanId")]
    pub span_id: String,
    /// W3C trace flags (bit 0 = sampled).
    #[serde(rename = "traceFlags")]
    pub trace_flags: u8,
}

/// One fully-enriched record, produced per log call and handed to every
/// admitted sink. Serializes to the flat JSON object written by the file
/// sink: `timestamp`, `level`, `message`, trace correlation fields when a
/// span was active, then all remaining fields (including `service`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub message: String,
    #[serde(flatten)]
    pub trace: Option<TraceContext>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}
