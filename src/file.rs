use crate::error::SinkError;
use crate::record::EnrichedRecord;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Durable local sink: one JSON object per line, appended to a file.
///
/// Every line carries at minimum `timestamp`, `level`, `message` and
/// `service`, plus the event's own fields and trace correlation fields
/// when a span was active. The file is opened lazily on first emit so
/// construction stays synchronous.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink {
            path: path.into(),
            file: Mutex::new(None),
        }
    }
}

#[async_trait]
impl LogSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn emit(&self, record: &EnrichedRecord) -> Result<(), SinkError> {
        let mut guard = self.file.lock().await;
        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            *guard = Some(file);
        }

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        if let Some(file) = guard.as_mut() {
            file.write_all(&line).await?;
        }
        Ok(())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        let mut guard = self.file.lock().await;
        if let Some(file) = guard.as_mut() {
            file.flush().await?;
        }
        Ok(())
    }
}
