use crate::record::EnrichedRecord;
use crate::sink::SinkConfig;
use crate::severity::Level;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

enum SinkCommand {
    Emit(EnrichedRecord),
    Flush(oneshot::Sender<()>),
}

struct SinkHandle {
    name: &'static str,
    min_level: Level,
    tx: mpsc::Sender<SinkCommand>,
}

/// Fans enriched records out to every configured sink.
///
/// Each sink gets its own bounded channel and background task, so records
/// reach a given sink strictly in dispatch order while sinks never share
/// fate: a slow or failing sink cannot delay, crash or starve the others,
/// and [`Dispatcher::dispatch`] never blocks the caller. When a sink's
/// queue is full the record is dropped for that sink and counted.
pub struct Dispatcher {
    sinks: Vec<SinkHandle>,
    workers: Vec<JoinHandle<()>>,
    /// Total records offered to the dispatcher.
    pub dispatched: Arc<AtomicU64>,
    /// Successfully enqueued (counted once per admitting sink).
    pub enqueued: Arc<AtomicU64>,
    /// Dropped because a sink's queue was full.
    pub dropped: Arc<AtomicU64>,
}

impl Dispatcher {
    /// Spawn one worker task per configured sink.
    ///
    /// `channel_buffer` bounds each sink's queue; a minimal threshold is
    /// enforced to avoid degenerate configurations. Must be called from
    /// within a Tokio runtime.
    pub fn new(configs: Vec<SinkConfig>, channel_buffer: usize) -> Self {
        let channel_buffer = channel_buffer.max(16);

        let mut sinks = Vec::with_capacity(configs.len());
        let mut workers = Vec::with_capacity(configs.len());

        for config in configs {
            let (tx, rx) = mpsc::channel::<SinkCommand>(channel_buffer);
            let name = config.sink.name();
            workers.push(tokio::spawn(run_sink(config.sink, rx)));
            sinks.push(SinkHandle {
                name,
                min_level: config.min_level,
                tx,
            });
        }

        Dispatcher {
            sinks,
            workers,
            dispatched: Arc::new(AtomicU64::new(0)),
            enqueued: Arc::new(AtomicU64::new(0)),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Hand a record to every sink whose threshold admits its level.
    ///
    /// Fire-and-forget: never blocks, never fails. Queue-full conditions
    /// are counted and reported to stderr, not surfaced to the caller.
    pub fn dispatch(&self, record: &EnrichedRecord) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);

        for handle in &self.sinks {
            if !record.level.passes(handle.min_level) {
                continue;
            }
            match handle.tx.try_send(SinkCommand::Emit(record.clone())) {
                Ok(()) => {
                    self.enqueued.fetch_add(1, Ordering::Relaxed);
                }
                Err(_) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    eprintln!("log sink {} queue full, dropping record", handle.name);
                }
            }
        }
    }

    /// Drain every sink's queue and flush its buffered output.
    ///
    /// Waits for each worker to acknowledge, so all records dispatched
    /// before this call have been emitted (or failed) once it returns.
    pub async fn flush(&self) {
        for handle in &self.sinks {
            let (ack_tx, ack_rx) = oneshot::channel();
            if handle.tx.send(SinkCommand::Flush(ack_tx)).await.is_ok() {
                let _ = ack_rx.await;
            }
        }
    }

    /// Number of spawned sink workers; mainly useful in diagnostics.
    pub fn sink_count(&self) -> usize {
        self.workers.len()
    }
}

async fn run_sink(sink: Arc<dyn crate::sink::LogSink>, mut rx: mpsc::Receiver<SinkCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            SinkCommand::Emit(record) => {
                if let Err(e) = sink.emit(&record).await {
                    eprintln!("log sink {} emit failed: {}", sink.name(), e);
                }
            }
            SinkCommand::Flush(ack) => {
                if let Err(e) = sink.flush().await {
                    eprintln!("log sink {} flush failed: {}", sink.name(), e);
                }
                let _ = ack.send(());
            }
        }
    }
}
