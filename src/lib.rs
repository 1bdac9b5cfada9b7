pub mod record;
pub mod severity;
pub mod context;
pub mod enrich;
pub mod error;
pub mod sink;
pub mod dispatch;
pub mod console;
pub mod file;
pub mod remote;
pub mod noop;

#[cfg(feature = "otlp")]
pub mod otlp;

pub mod logger;
pub mod layer;
pub mod env;
pub mod init;

pub use logger::Logger;
pub use record::{EnrichedRecord, LogEvent, TraceContext};
pub use severity::Level;
