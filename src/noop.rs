use crate::error::SinkError;
use crate::remote::{TelemetryEmitter, TelemetryRecord};
use async_trait::async_trait;

/// An emitter that simply drops all records.
///
/// Useful for measuring the overhead of the pipeline itself without any
/// network I/O, and for unit tests that don't care about delivery.
#[derive(Clone, Default)]
pub struct NoopEmitter;

#[async_trait]
impl TelemetryEmitter for NoopEmitter {
    async fn emit(&self, _record: &TelemetryRecord) -> Result<(), SinkError> {
        Ok(())
    }
}
