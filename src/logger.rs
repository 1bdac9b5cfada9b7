use crate::context::current_trace_context;
use crate::dispatch::Dispatcher;
use crate::enrich::enrich;
use crate::record::LogEvent;
use crate::severity::Level;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Explicit handle to the logging pipeline.
///
/// Constructed once at process start (see [`crate::init::LoggerBuilder`])
/// and cloned into whatever needs it; there is no global singleton.
/// Every operation is fire-and-forget: nothing on the log path returns
/// an error or blocks on sink I/O.
#[derive(Clone)]
pub struct Logger {
    dispatcher: Arc<Dispatcher>,
    defaults: Arc<BTreeMap<String, Value>>,
    min_level: Level,
}

impl Logger {
    pub(crate) fn new(
        dispatcher: Dispatcher,
        defaults: BTreeMap<String, Value>,
        min_level: Level,
    ) -> Self {
        Logger {
            dispatcher: Arc::new(dispatcher),
            defaults: Arc::new(defaults),
            min_level,
        }
    }

    /// Enrich and dispatch one event.
    ///
    /// Reads the active trace context at this moment, merges defaults and
    /// correlation fields, then fans the record out to every admitting
    /// sink. Events below the logger-wide minimum level are dropped
    /// before enrichment.
    pub fn log(&self, event: LogEvent) {
        if !event.level.passes(self.min_level) {
            return;
        }
        let record = enrich(event, current_trace_context(), &self.defaults);
        self.dispatcher.dispatch(&record);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Error, message));
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Warn, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Info, message));
    }

    pub fn http(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Http, message));
    }

    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Verbose, message));
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Debug, message));
    }

    pub fn silly(&self, message: impl Into<String>) {
        self.log(LogEvent::new(Level::Silly, message));
    }

    /// Drain every sink's queue; useful before shutdown and in tests.
    pub async fn flush(&self) {
        self.dispatcher.flush().await;
    }

    /// Dispatcher counters, exposed for diagnostics.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
