//! Output module: the CSV export and the run summary

mod csv_sink;
mod markdown;
pub mod stats;
mod traits;

pub use csv_sink::{write_csv, CsvSink, CSV_HEADERS};
pub use markdown::{format_markdown_summary, write_markdown_summary};
pub use stats::{print_summary, HarvestSummary};
pub use traits::{MemorySink, OutputError, OutputResult, RecordSink};
