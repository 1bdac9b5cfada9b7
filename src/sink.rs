use crate::error::SinkError;
use crate::record::EnrichedRecord;
use crate::severity::Level;
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous destination for [`EnrichedRecord`]s produced by the
/// enrichment pipeline.
///
/// Implementations cover the closed set of destinations (console, local
/// file, remote telemetry emitter) plus whatever test doubles need the
/// seam. Each sink owns its resource exclusively and applies its own
/// formatting before final emission.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Short name used in internal diagnostics when an emit fails.
    fn name(&self) -> &'static str;

    /// Deliver a single enriched record to the underlying destination.
    ///
    /// **Parameters**
    /// - `record`: fully-enriched record produced by the dispatcher.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was accepted by the destination.
    /// - `Err(..)` if the destination failed (network error, disk full,
    ///   permission error, serialization error). The dispatcher worker
    ///   reports the failure to stderr and moves on; it never reaches the
    ///   call site that issued the log call.
    ///
    /// Called from a dedicated Tokio task that owns this sink's queue, so
    /// records arrive strictly in dispatch order. Implementations should
    /// use async I/O and must not assume any other sink's state.
    async fn emit(&self, record: &EnrichedRecord) -> Result<(), SinkError>;

    /// Flush any buffered output, if the destination buffers.
    ///
    /// Default implementation is a no-op.
    async fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// One configured sink: the destination plus its severity threshold.
/// Built once at startup and immutable for the process lifetime.
#[derive(Clone)]
pub struct SinkConfig {
    /// Records below this threshold are dropped for this sink only.
    pub min_level: Level,
    pub sink: Arc<dyn LogSink>,
}

impl SinkConfig {
    pub fn new(min_level: Level, sink: Arc<dyn LogSink>) -> Self {
        SinkConfig { min_level, sink }
    }
}
