use crate::console::ConsoleSink;
use crate::dispatch::Dispatcher;
#[cfg(feature = "otlp")]
use crate::env;
#[cfg(feature = "otlp")]
use crate::error::ConfigError;
use crate::file::FileSink;
use crate::layer::FanoutLayer;
use crate::logger::Logger;
use crate::remote::{RemoteSink, TelemetryEmitter};
use crate::severity::Level;
use crate::sink::{LogSink, SinkConfig};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Assembles the sink set and process-wide defaults for a [`Logger`].
///
/// The sink list is fixed once `build` is called; there is no dynamic
/// add/remove at runtime. Each added sink carries its own severity
/// threshold, independent of the logger-wide minimum level.
pub struct LoggerBuilder {
    min_level: Level,
    channel_buffer: usize,
    defaults: BTreeMap<String, Value>,
    sinks: Vec<SinkConfig>,
}

impl LoggerBuilder {
    /// Start a builder for the given service. The service name becomes
    /// the `service` default field on every record.
    pub fn new(service_name: impl Into<String>) -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("service".to_string(), Value::String(service_name.into()));
        LoggerBuilder {
            min_level: Level::Info,
            channel_buffer: 1024,
            defaults,
            sinks: Vec::new(),
        }
    }

    /// Logger-wide minimum level, applied before enrichment.
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Per-sink queue capacity before records are dropped for that sink.
    pub fn channel_buffer(mut self, capacity: usize) -> Self {
        self.channel_buffer = capacity;
        self
    }

    /// Add a default field merged into every record at lowest precedence.
    pub fn default_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Add an arbitrary sink with its severity threshold.
    pub fn sink(mut self, min_level: Level, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(SinkConfig::new(min_level, sink));
        self
    }

    /// Add the human-readable stdout sink.
    pub fn console(self, min_level: Level) -> Self {
        self.sink(min_level, Arc::new(ConsoleSink))
    }

    /// Add the JSON-lines file sink.
    pub fn file(self, min_level: Level, path: impl Into<std::path::PathBuf>) -> Self {
        self.sink(min_level, Arc::new(FileSink::new(path)))
    }

    /// Add the remote sink on top of the given emitter.
    pub fn remote(self, min_level: Level, emitter: Arc<dyn TelemetryEmitter>) -> Self {
        self.sink(min_level, Arc::new(RemoteSink::new(emitter)))
    }

    /// Spawn the sink workers and hand back the logger. Must be called
    /// from within a Tokio runtime.
    pub fn build(self) -> Logger {
        let dispatcher = Dispatcher::new(self.sinks, self.channel_buffer);
        Logger::new(dispatcher, self.defaults, self.min_level)
    }
}

/// Build the full console + file + remote stack from the environment.
///
/// Reads `LOG_LEVEL`, `OTEL_SERVICE_NAME`, `LOG_FILE_PATH`, the OTLP
/// logs endpoint and the ingestion key once; the resulting configuration
/// is immutable for the process lifetime.
///
/// **Returns**
/// - `Err(ConfigError::MissingEnv)` when the ingestion key is absent.
///   Callers are expected to treat this as fatal and exit with the
///   diagnostic rather than run with a broken telemetry path.
#[cfg(feature = "otlp")]
pub fn logger_from_env() -> Result<Logger, ConfigError> {
    let emitter = crate::otlp::OtlpHttpEmitter::from_env()?;
    let min_level = Level::from_name(&env::env_or(env::LOG_LEVEL_ENV, "info"));

    Ok(
        LoggerBuilder::new(env::env_or(env::SERVICE_NAME_ENV, env::DEFAULT_SERVICE_NAME))
            .min_level(min_level)
            .console(min_level)
            .file(min_level, env::env_or(env::LOG_FILE_ENV, env::DEFAULT_LOG_FILE))
            .remote(min_level, Arc::new(emitter))
            .build(),
    )
}

/// Install a [`FanoutLayer`] over the given logger as the global
/// `tracing` subscriber, so every `tracing` event in the process flows
/// through the same pipeline.
pub fn install(logger: Logger) {
    let subscriber = Registry::default().with(FanoutLayer::new(logger));
    tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
}
