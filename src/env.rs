/// Environment variable names used by this crate for convenient
/// configuration at process startup.
///
/// These are purely helpers; the core pipeline types remain decoupled
/// from environment access.

/// Logger-wide minimum level, e.g. `info`. Lenient parse: unrecognized
/// names fall back to `info`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Logical service name merged into every record as the `service` field
/// and reported as the `service.name` resource attribute.
pub const SERVICE_NAME_ENV: &str = "OTEL_SERVICE_NAME";

/// Ingestion key for the remote backend. Required when the OTLP emitter
/// is built from the environment.
pub const INGESTION_KEY_ENV: &str = "SIGNOZ_INGESTION_KEY";

/// Full OTLP/HTTP logs endpoint URL.
pub const OTLP_LOGS_ENDPOINT_ENV: &str = "OTEL_EXPORTER_OTLP_LOGS_ENDPOINT";

/// Target path for the file sink.
pub const LOG_FILE_ENV: &str = "LOG_FILE_PATH";

pub const DEFAULT_SERVICE_NAME: &str = "tracing-fanout-demo";
pub const DEFAULT_LOGS_ENDPOINT: &str = "https://ingest.signoz.cloud:443/v1/logs";
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
