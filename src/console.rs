use crate::error::SinkError;
use crate::record::EnrichedRecord;
use crate::sink::LogSink;
use async_trait::async_trait;
use chrono::SecondsFormat;
use serde_json::Value;
use std::collections::BTreeMap;

/// Render one record as a single human-readable console line.
///
/// Shape: `<timestamp> [<level>]: <message>`, then ` [traceId=..]` and
/// ` [spanId=..]` when a span was active, then a JSON blob of whatever
/// fields remain. The `service` field is stripped from the blob (it is
/// redundant on a local console and still present in the other sinks),
/// and an empty blob is omitted entirely rather than printed as `{}`.
///
/// Pure function, no I/O.
pub fn format_line(record: &EnrichedRecord) -> String {
    let mut line = format!(
        "{} [{}]: {}",
        record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        record.level,
        record.message
    );

    if let Some(trace) = &record.trace {
        line.push_str(&format!(" [traceId={}]", trace.trace_id));
        line.push_str(&format!(" [spanId={}]", trace.span_id));
    }

    let metadata: BTreeMap<&String, &Value> = record
        .fields
        .iter()
        .filter(|(key, _)| key.as_str() != "service")
        .collect();

    if !metadata.is_empty() {
        if let Ok(blob) = serde_json::to_string(&metadata) {
            line.push(' ');
            line.push_str(&blob);
        }
    }

    line
}

/// Writes each record to stdout as one formatted line.
#[derive(Clone, Default)]
pub struct ConsoleSink;

#[async_trait]
impl LogSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn emit(&self, record: &EnrichedRecord) -> Result<(), SinkError> {
        println!("{}", format_line(record));
        Ok(())
    }
}
