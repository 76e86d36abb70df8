//! Record sink trait and error types

use crate::model::Record;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the final record list
///
/// A harvest calls [`write_records`](RecordSink::write_records) exactly once,
/// after the renderer has been shut down, with the deduplicated records.
pub trait RecordSink {
    /// Writes all records, returning how many were written
    fn write_records(&mut self, records: &[Record]) -> OutputResult<usize>;

    /// Human-readable description of where the records go
    fn destination(&self) -> String;
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<Record>,
    pub writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn write_records(&mut self, records: &[Record]) -> OutputResult<usize> {
        self.writes += 1;
        self.records.extend_from_slice(records);
        Ok(records.len())
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}
