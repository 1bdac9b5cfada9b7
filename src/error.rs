/// Error type returned when building a logger from the environment.
///
/// Configuration problems are the one failure class that is not swallowed:
/// a process with a broken telemetry path should refuse to start.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
}

/// Error type produced by sink and emitter implementations.
///
/// These never reach application code: the dispatcher workers report them
/// to stderr and carry on.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "otlp")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend rejected record: {0}")]
    Backend(String),
}
