use thiserror::Error;

use crate::HitRow;

/// Destination columnar store for decoded hits.
///
/// Traces are appended first so their index can be stored alongside the
/// row; `flush` must make every row appended since the previous flush
/// durable. Calls arrive from a single sequential path.
pub trait HitSink {
    /// Append one trace and return its 1-based index.
    fn append_trace(&mut self, samples: &[i32]) -> Result<u64, SinkError>;
    /// Append one hit row.
    fn append(&mut self, row: &HitRow) -> Result<(), SinkError>;
    /// Persist everything appended since the last flush.
    fn flush(&mut self) -> Result<(), SinkError>;
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sink serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory sink for tests and small conversions.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<HitRow>,
    pub traces: Vec<Vec<i32>>,
    pub flushes: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HitSink for MemorySink {
    fn append_trace(&mut self, samples: &[i32]) -> Result<u64, SinkError> {
        self.traces.push(samples.to_vec());
        Ok(self.traces.len() as u64)
    }

    fn append(&mut self, row: &HitRow) -> Result<(), SinkError> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}
