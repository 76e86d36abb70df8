//! Listing-page traversal
//!
//! Walks listing pages `0..max_pages` in order and accumulates team links
//! into an identity-keyed [`LinkSet`]. A page that cannot be loaded is
//! skipped; it never aborts the walk. An empty page does not end it either:
//! the page count is a fixed setting, not discovered from the site.

use crate::config::SiteConfig;
use crate::crawler::category::team_anchor_selector;
use crate::crawler::navigator::ResilientNavigator;
use crate::crawler::parser::parse_listing;
use crate::model::LinkSet;
use crate::renderer::SessionLauncher;
use crate::state::Outcome;
use crate::url::listing_page_url;
use url::Url;

/// Tally of one listing walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub pages_loaded: u32,
    pub pages_skipped: u32,
    /// Team anchors seen across all pages, duplicates included
    pub links_seen: usize,
    pub duplicates_dropped: usize,
}

impl CollectReport {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PageLoaded => self.pages_loaded += 1,
            Outcome::PageSkipped => self.pages_skipped += 1,
            _ => {}
        }
    }
}

/// Collects team links from the paginated listing
pub struct LinkCollector<'a, L: SessionLauncher> {
    navigator: &'a mut ResilientNavigator<L>,
    site: &'a SiteConfig,
    base_url: Url,
    ready_selector: String,
    report: CollectReport,
}

impl<'a, L: SessionLauncher> LinkCollector<'a, L> {
    pub fn new(navigator: &'a mut ResilientNavigator<L>, site: &'a SiteConfig, base_url: Url) -> Self {
        let ready_selector = team_anchor_selector(&site.team_path_root);
        Self {
            navigator,
            site,
            base_url,
            ready_selector,
            report: CollectReport::default(),
        }
    }

    /// Visits listing pages `0..max_pages` and returns the unique links found
    pub async fn collect(&mut self, max_pages: u32) -> LinkSet {
        tracing::info!("Collecting startup links from {} listing pages...", max_pages);
        let mut links = LinkSet::new();

        for page in 0..max_pages {
            let outcome = self.collect_page(page, &mut links).await;
            tracing::debug!("Listing page {}: {}", page + 1, outcome);
            self.report.record(outcome);
        }

        tracing::info!(
            "Total unique startup links: {} ({} pages loaded, {} skipped)",
            links.len(),
            self.report.pages_loaded,
            self.report.pages_skipped
        );
        links
    }

    async fn collect_page(&mut self, page: u32, links: &mut LinkSet) -> Outcome {
        let page_url = match listing_page_url(
            &self.base_url,
            &self.site.listing_path,
            &self.site.page_param,
            page,
        ) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot build URL for listing page {}: {}", page + 1, e);
                return Outcome::PageSkipped;
            }
        };

        let document = match self.navigator.load(page_url.as_str(), &self.ready_selector).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Skipping listing page {}: {}", page + 1, e);
                return Outcome::PageSkipped;
            }
        };

        let found = parse_listing(document.html(), &self.base_url, &self.site.team_path_root);
        if found.is_empty() {
            tracing::info!("No team links on listing page {}", page + 1);
        }

        for entry in found {
            self.report.links_seen += 1;
            if !links.insert(entry) {
                self.report.duplicates_dropped += 1;
            }
        }

        tracing::info!("Collected links from page {}", page + 1);
        Outcome::PageLoaded
    }

    pub fn report(&self) -> CollectReport {
        self.report
    }
}
