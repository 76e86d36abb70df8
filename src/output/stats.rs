//! Run statistics

use crate::crawler::{CollectReport, ExtractReport};
use chrono::{DateTime, Utc};

/// What one harvest did, from listing walk to export
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    pub config_hash: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    pub pages_requested: u32,
    pub pages_loaded: u32,
    pub pages_skipped: u32,

    pub links_seen: usize,
    pub unique_links: usize,
    /// Repeat sightings of an already collected link
    pub duplicate_links: usize,

    pub records_extracted: usize,
    pub records_placeholder: usize,
    /// Records left after exact-duplicate removal
    pub records_written: usize,

    /// Renderer restarts across the whole run
    pub restarts: u32,
    pub destination: String,
}

impl HarvestSummary {
    pub fn new(config_hash: impl Into<String>, pages_requested: u32) -> Self {
        Self {
            config_hash: config_hash.into(),
            started_at: Utc::now(),
            finished_at: None,
            pages_requested,
            pages_loaded: 0,
            pages_skipped: 0,
            links_seen: 0,
            unique_links: 0,
            duplicate_links: 0,
            records_extracted: 0,
            records_placeholder: 0,
            records_written: 0,
            restarts: 0,
            destination: String::new(),
        }
    }

    pub fn absorb_collect(&mut self, report: CollectReport, unique_links: usize) {
        self.pages_loaded = report.pages_loaded;
        self.pages_skipped = report.pages_skipped;
        self.links_seen = report.links_seen;
        self.unique_links = unique_links;
        self.duplicate_links = report.duplicates_dropped;
    }

    pub fn absorb_extract(&mut self, report: ExtractReport) {
        self.records_extracted = report.extracted;
        self.records_placeholder = report.placeholders;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of detail pages that yielded a real record, in percent
    pub fn extraction_rate(&self) -> f64 {
        let total = self.records_extracted + self.records_placeholder;
        if total == 0 {
            return 0.0;
        }
        self.records_extracted as f64 / total as f64 * 100.0
    }

    /// Emits the summary through the log
    pub fn log(&self) {
        tracing::info!(
            "Listing pages: {} loaded, {} skipped of {}",
            self.pages_loaded,
            self.pages_skipped,
            self.pages_requested
        );
        tracing::info!(
            "Startup links: {} unique ({} seen, {} duplicates dropped)",
            self.unique_links,
            self.links_seen,
            self.duplicate_links
        );
        tracing::info!(
            "Records: {} extracted, {} placeholders, {} written to {}",
            self.records_extracted,
            self.records_placeholder,
            self.records_written,
            self.destination
        );
        if self.restarts > 0 {
            tracing::info!("Renderer restarts: {}", self.restarts);
        }
        if let Some(secs) = self.duration_seconds() {
            tracing::info!("Elapsed: {}s", secs);
        }
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &HarvestSummary) {
    println!("=== Harvest Summary ===\n");

    println!("Listing:");
    println!("  Pages requested: {}", summary.pages_requested);
    println!("  Pages loaded: {}", summary.pages_loaded);
    println!("  Pages skipped: {}", summary.pages_skipped);
    println!("  Unique links: {}", summary.unique_links);
    println!("  Duplicate links dropped: {}", summary.duplicate_links);
    println!();

    println!("Details:");
    println!("  Extracted: {}", summary.records_extracted);
    println!("  Placeholders: {}", summary.records_placeholder);
    println!("  Extraction rate: {:.1}%", summary.extraction_rate());
    println!("  Renderer restarts: {}", summary.restarts);
    println!();

    println!(
        "Wrote {} records to {}",
        summary.records_written, summary.destination
    );
}
