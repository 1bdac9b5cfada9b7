use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::record::{EnrichedRecord, LogEvent, TraceContext};

/// Field names reserved for trace correlation. Callers cannot set these:
/// trace linkage must come from the tracing subsystem or not at all.
pub const RESERVED_KEYS: [&str; 3] = ["traceId", "spanId", "traceFlags"];

/// Merge a log event with the active trace context and process-wide
/// defaults into one enriched record.
///
/// Precedence, lowest to highest: defaults, event fields, trace context.
/// Reserved correlation keys are stripped from both defaults and event
/// fields unconditionally, so a record without an active span carries no
/// correlation keys at all. A timestamp is stamped from the wall clock
/// when the event does not already carry one.
pub fn enrich(
    event: LogEvent,
    ctx: Option<TraceContext>,
    defaults: &BTreeMap<String, Value>,
) -> EnrichedRecord {
    let mut fields: BTreeMap<String, Value> = defaults
        .iter()
        .filter(|(key, _)| !is_reserved(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    for (key, value) in event.fields {
        if is_reserved(&key) {
            continue;
        }
        fields.insert(key, value);
    }

    EnrichedRecord {
        timestamp: event.timestamp.unwrap_or_else(Utc::now),
        level: event.level,
        message: event.message,
        trace: ctx,
        fields,
    }
}

fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
