use crate::env;
use crate::error::{ConfigError, SinkError};
use crate::remote::{TelemetryEmitter, TelemetryRecord};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Configuration for [`OtlpHttpEmitter`].
///
/// The emitter speaks OTLP/HTTP JSON to a logs ingestion endpoint and
/// authenticates with a `signoz-access-token` header.
#[derive(Clone, Debug)]
pub struct OtlpConfig {
    /// Full logs endpoint URL, e.g. "https://ingest.signoz.cloud:443/v1/logs".
    pub endpoint: String,
    pub ingestion_key: String,
    /// Reported as the `service.name` resource attribute.
    pub service_name: String,
}

/// OTLP/HTTP implementation of [`TelemetryEmitter`].
#[derive(Clone)]
pub struct OtlpHttpEmitter {
    client: Client,
    config: OtlpConfig,
}

impl OtlpHttpEmitter {
    pub fn new(config: OtlpConfig) -> Self {
        let client = Client::new();
        OtlpHttpEmitter { client, config }
    }

    /// Build an emitter from the environment.
    ///
    /// **Returns**
    /// - `Err(ConfigError::MissingEnv)` when the ingestion key is absent.
    ///   This is fatal by design: the process should refuse to start with
    ///   a silently broken telemetry path.
    pub fn from_env() -> Result<Self, ConfigError> {
        let ingestion_key = std::env::var(env::INGESTION_KEY_ENV)
            .map_err(|_| ConfigError::MissingEnv(env::INGESTION_KEY_ENV))?;

        Ok(OtlpHttpEmitter::new(OtlpConfig {
            endpoint: env::env_or(env::OTLP_LOGS_ENDPOINT_ENV, env::DEFAULT_LOGS_ENDPOINT),
            ingestion_key,
            service_name: env::env_or(env::SERVICE_NAME_ENV, env::DEFAULT_SERVICE_NAME),
        }))
    }

    fn payload(&self, record: &TelemetryRecord) -> Value {
        let attributes: Vec<Value> = record
            .attributes
            .iter()
            .map(|(key, value)| json!({ "key": key, "value": any_value(value) }))
            .collect();

        let mut log_record = json!({
            "timeUnixNano": record.timestamp.timestamp_nanos_opt().unwrap_or_default().to_string(),
            "severityNumber": record.severity_number as i32,
            "severityText": record.severity_text,
            "body": { "stringValue": record.body },
            "attributes": attributes,
        });

        if let Some(trace) = &record.trace {
            log_record["traceId"] = json!(trace.trace_id);
            log_record["spanId"] = json!(trace.span_id);
            log_record["flags"] = json!(trace.trace_flags as u32);
        }

        json!({
            "resourceLogs": [{
                "resource": {
                    "attributes": [{
                        "key": "service.name",
                        "value": { "stringValue": self.config.service_name }
                    }]
                },
                "scopeLogs": [{
                    "scope": { "name": "tracing-fanout" },
                    "logRecords": [log_record]
                }]
            }]
        })
    }
}

#[async_trait]
impl TelemetryEmitter for OtlpHttpEmitter {
    async fn emit(&self, record: &TelemetryRecord) -> Result<(), SinkError> {
        let resp = self
            .client
            .post(&self.config.endpoint)
            .header("signoz-access-token", &self.config.ingestion_key)
            .json(&self.payload(record))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(SinkError::Backend(format!(
                "OTLP log export failed with status {}: {}",
                status, text
            )))
        }
    }
}

/// Map a JSON field value onto the OTLP `AnyValue` JSON encoding.
/// Nested structures are stringified rather than recursed into.
fn any_value(value: &Value) -> Value {
    match value {
        Value::String(s) => json!({ "stringValue": s }),
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({ "intValue": n.to_string() }),
        Value::Number(n) => json!({ "doubleValue": n.as_f64() }),
        other => json!({ "stringValue": other.to_string() }),
    }
}
