//! CSV export
//!
//! One header row, then one row per record. Missing contact fields are
//! written as the "No Info Found" sentinel, never as empty cells.

use crate::model::Record;
use crate::output::traits::{OutputResult, RecordSink};
use std::io;
use std::path::{Path, PathBuf};

pub const CSV_HEADERS: [&str; 4] = ["Company Name", "CityU URL", "Company Website", "Email"];

/// Writes records as CSV to any writer
pub fn write_csv<W: io::Write>(writer: W, records: &[Record]) -> OutputResult<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for record in records {
        wtr.write_record([
            record.name.as_str(),
            record.source_url.as_str(),
            record.website_or_sentinel(),
            record.email_or_sentinel(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// Sink that replaces the file at `path` on every write
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn write_records(&mut self, records: &[Record]) -> OutputResult<usize> {
        let file = std::fs::File::create(&self.path)?;
        let written = write_csv(io::BufWriter::new(file), records)?;
        tracing::info!("Wrote {} records to {}", written, self.path.display());
        Ok(written)
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
