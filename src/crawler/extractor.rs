//! Detail-page extraction
//!
//! Loads each collected link's detail page and turns it into exactly one
//! [`Record`]. A detail page that cannot be loaded still produces a record,
//! with both contact fields set to the sentinel.

use crate::crawler::navigator::ResilientNavigator;
use crate::crawler::parser::ContactRules;
use crate::model::{LinkEntry, LinkSet, Record};
use crate::renderer::SessionLauncher;
use crate::state::Outcome;
use std::time::Duration;
use tokio::time::sleep;

/// Detail pages carry no reliable marker element; any rendered body will do
pub const DETAIL_READY_SELECTOR: &str = "body";

/// Tally of one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub extracted: usize,
    pub placeholders: usize,
}

impl ExtractReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::ItemExtracted => self.extracted += 1,
            Outcome::ItemPlaceholdered => self.placeholders += 1,
            _ => {}
        }
    }
}

/// Extracts contact records from detail pages
pub struct DetailExtractor<'a, L: SessionLauncher> {
    navigator: &'a mut ResilientNavigator<L>,
    rules: ContactRules,
    rate_limit: Duration,
    report: ExtractReport,
}

impl<'a, L: SessionLauncher> DetailExtractor<'a, L> {
    pub fn new(navigator: &'a mut ResilientNavigator<L>, rules: ContactRules, rate_limit: Duration) -> Self {
        Self {
            navigator,
            rules,
            rate_limit,
            report: ExtractReport::default(),
        }
    }

    /// Produces one record per link, in the set's order
    pub async fn extract(&mut self, links: LinkSet) -> Vec<Record> {
        tracing::info!("Scraping startup detail pages...");
        let total = links.len();
        let mut records = Vec::with_capacity(total);

        for (index, link) in links.into_iter().enumerate() {
            let (record, outcome) = self.extract_one(&link).await;
            self.report.record(outcome);

            if outcome.is_failure() {
                tracing::info!("[{}/{}] Placeholder: {}", index + 1, total, link.display_name());
            } else {
                tracing::info!("[{}/{}] Saved: {}", index + 1, total, link.display_name());
            }

            records.push(record);
            sleep(self.rate_limit).await;
        }

        records
    }

    async fn extract_one(&mut self, link: &LinkEntry) -> (Record, Outcome) {
        match self
            .navigator
            .load(link.target_url(), DETAIL_READY_SELECTOR)
            .await
        {
            Ok(document) => {
                let info = self.rules.extract(document.html());
                (
                    Record::extracted(link, info.website, info.email),
                    Outcome::ItemExtracted,
                )
            }
            Err(e) => {
                tracing::warn!("No detail page for {}: {}", link.display_name(), e);
                (Record::placeholder(link), Outcome::ItemPlaceholdered)
            }
        }
    }

    pub fn report(&self) -> ExtractReport {
        self.report
    }
}
