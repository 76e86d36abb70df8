use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Startup-Harvest
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// values the HK Tech 300 run was tuned with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawl: CrawlConfig,
    pub renderer: RendererConfig,
    pub output: OutputConfig,
}

/// The target site and its markup contract
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin that relative hrefs are resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the paginated listing
    #[serde(rename = "listing-path")]
    pub listing_path: String,

    /// Query parameter carrying the zero-based page index
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// Path prefix shared by all team category anchors
    #[serde(rename = "team-path-root")]
    pub team_path_root: String,

    /// The site's own domain; links containing it are never a team website
    #[serde(rename = "own-domain")]
    pub own_domain: String,

    /// The site's generic contact address, discarded when found as a team email
    #[serde(rename = "generic-email")]
    pub generic_email: String,

    /// Domain patterns (e.g. "*.linkedin.com") that never count as a team website
    #[serde(rename = "social-domains")]
    pub social_domains: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.cityu.edu.hk".to_string(),
            listing_path: "/hktech300/start-ups/all-start-ups".to_string(),
            page_param: "page".to_string(),
            team_path_root: "/hktech300/start-ups/".to_string(),
            own_domain: "cityu.edu.hk".to_string(),
            generic_email: "hktech300.info@cityu.edu.hk".to_string(),
            social_domains: [
                "*.facebook.com",
                "*.linkedin.com",
                "*.twitter.com",
                "*.instagram.com",
                "*.youtube.com",
            ]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        }
    }
}

/// Traversal and retry behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Number of listing pages to visit (pages 0..max_pages)
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Attempts per URL before giving up
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Pause after navigation before looking for the ready selector (milliseconds)
    #[serde(rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,

    /// How long to wait for the ready selector to appear (milliseconds)
    #[serde(rename = "ready-timeout-ms")]
    pub ready_timeout_ms: u64,

    /// Lower bound of the randomized pause after a restart (milliseconds)
    #[serde(rename = "backoff-min-ms")]
    pub backoff_min_ms: u64,

    /// Upper bound of the randomized pause after a restart (milliseconds)
    #[serde(rename = "backoff-max-ms")]
    pub backoff_max_ms: u64,

    /// Pause after every detail page (milliseconds)
    #[serde(rename = "rate-limit-ms")]
    pub rate_limit_ms: u64,
}

impl CrawlConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.ready_timeout_ms)
    }

    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 42,
            max_attempts: 3,
            settle_delay_ms: 2_000,
            ready_timeout_ms: 60_000,
            backoff_min_ms: 3_000,
            backoff_max_ms: 6_000,
            rate_limit_ms: 1_000,
        }
    }
}

/// Which renderer backend drives page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Headless Chrome over the DevTools protocol
    Chrome,
    /// Plain HTTP fetch, no script execution
    Http,
}

/// Renderer launch parameters, opaque to the crawl logic
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub kind: RendererKind,

    pub headless: bool,

    #[serde(rename = "window-width")]
    pub window_width: u32,

    #[serde(rename = "window-height")]
    pub window_height: u32,

    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Hide the `navigator.webdriver` automation fingerprint
    #[serde(rename = "suppress-automation")]
    pub suppress_automation: bool,

    #[serde(rename = "no-sandbox")]
    pub no_sandbox: bool,

    #[serde(rename = "page-load-timeout-secs")]
    pub page_load_timeout_secs: u64,

    #[serde(rename = "script-timeout-secs")]
    pub script_timeout_secs: u64,

    /// Browser binary; auto-detected when absent
    pub executable: Option<String>,
}

impl RendererConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    pub fn script_timeout(&self) -> Duration {
        Duration::from_secs(self.script_timeout_secs)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::Chrome,
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: "Mozilla/5.0".to_string(),
            suppress_automation: true,
            no_sandbox: true,
            page_load_timeout_secs: 120,
            script_timeout_secs: 90,
            executable: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file receiving the records
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Log file written alongside stderr
    #[serde(rename = "log-path")]
    pub log_path: Option<String>,

    /// Markdown run summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "all_startup_details.csv".to_string(),
            log_path: Some("scraper.log".to_string()),
            summary_path: None,
        }
    }
}
