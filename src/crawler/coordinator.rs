//! Harvest coordinator - main run orchestration
//!
//! Drives one complete run:
//! - Launching the renderer behind a [`ResilientNavigator`]
//! - Walking the listing pages into a link set
//! - Extracting one record per link
//! - Closing the renderer, deduplicating and handing the records to a sink

use crate::config::{validate, Config, RendererKind};
use crate::crawler::collector::LinkCollector;
use crate::crawler::extractor::DetailExtractor;
use crate::crawler::navigator::{ResilientNavigator, RetryPolicy};
use crate::crawler::parser::ContactRules;
use crate::model::dedup_records;
use crate::output::{write_markdown_summary, CsvSink, HarvestSummary, RecordSink};
use crate::renderer::{ChromeLauncher, HttpLauncher, SessionLauncher};
use std::path::Path;
use url::Url;

/// One configured harvest run over a given renderer backend
pub struct Harvester<L: SessionLauncher> {
    config: Config,
    launcher: L,
    config_hash: String,
}

impl<L: SessionLauncher> Harvester<L> {
    pub fn new(config: Config, launcher: L) -> Self {
        Self {
            config,
            launcher,
            config_hash: "default".to_string(),
        }
    }

    /// Tags the run summary with the hash of the config file it came from
    pub fn with_config_hash(mut self, config_hash: impl Into<String>) -> Self {
        self.config_hash = config_hash.into();
        self
    }

    /// Runs the harvest to completion
    ///
    /// Only startup problems are fatal: an invalid configuration, or a
    /// renderer that cannot be launched at all. Both are checked before or
    /// during the first launch. Once the renderer is up,
    /// per-page failures are absorbed and the run always reaches the sink.
    ///
    /// # Returns
    ///
    /// * `Ok(HarvestSummary)` - Records were written
    /// * `Err(HarvestError)` - Startup failed or the sink could not be written
    pub async fn run(self, sink: &mut dyn RecordSink) -> crate::Result<HarvestSummary> {
        let Harvester {
            config,
            launcher,
            config_hash,
        } = self;

        validate(&config)?;

        let max_pages = config.crawl.max_pages;
        let mut summary = HarvestSummary::new(config_hash, max_pages);

        let rules = ContactRules::from_site(&config.site)?;
        let base_url = Url::parse(&config.site.base_url)?;
        let policy = RetryPolicy::from_config(&config.crawl);

        tracing::info!("Launching {:?} renderer", config.renderer.kind);
        let mut navigator =
            ResilientNavigator::launch(launcher, config.renderer.clone(), policy).await?;

        let links = {
            let mut collector = LinkCollector::new(&mut navigator, &config.site, base_url);
            let links = collector.collect(max_pages).await;
            summary.absorb_collect(collector.report(), links.len());
            links
        };

        let records = {
            let mut extractor =
                DetailExtractor::new(&mut navigator, rules, config.crawl.rate_limit());
            let records = extractor.extract(links).await;
            summary.absorb_extract(extractor.report());
            records
        };

        summary.restarts = navigator.restart_count();
        navigator.shutdown().await;
        tracing::info!("Renderer closed");

        let records = dedup_records(records);
        summary.records_written = sink.write_records(&records)?;
        summary.destination = sink.destination();
        summary.finish();

        Ok(summary)
    }
}

/// Runs a complete harvest from configuration, writing the CSV and optional summary
///
/// This is the main entry point for a run. It picks the renderer backend
/// named in the config, writes records to `output.csv-path`, logs the run
/// summary, and writes the markdown summary if `output.summary-path` is set.
pub async fn run_harvest(config: Config, config_hash: &str) -> crate::Result<HarvestSummary> {
    let mut sink = CsvSink::new(&config.output.csv_path);
    let summary_path = config.output.summary_path.clone();
    let kind = config.renderer.kind;

    let summary = match kind {
        RendererKind::Chrome => {
            Harvester::new(config, ChromeLauncher::new())
                .with_config_hash(config_hash)
                .run(&mut sink)
                .await?
        }
        RendererKind::Http => {
            Harvester::new(config, HttpLauncher::new())
                .with_config_hash(config_hash)
                .run(&mut sink)
                .await?
        }
    };

    summary.log();

    if let Some(path) = summary_path {
        write_markdown_summary(&summary, Path::new(&path))?;
        tracing::info!("Summary written to {}", path);
    }

    Ok(summary)
}
