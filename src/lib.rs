//! Startup-Harvest: a resilient listing-and-detail scraper
//!
//! This crate walks the paginated HK Tech 300 start-up listing, follows every
//! team link to its detail page, and extracts each team's website and contact
//! email. Rendering goes through a restartable browser session so that long
//! sequential runs survive timeouts and corrupted renderer state.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod renderer;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Startup-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start renderer: {0}")]
    StartupFailure(#[source] renderer::RenderError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid selector: {0}")]
    Selector(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// A URL that could not be loaded within the configured number of attempts
#[derive(Debug, Error)]
#[error("Giving up on {url} after {attempts} attempts: {last_cause}")]
pub struct NavigationError {
    pub url: String,
    pub attempts: u32,
    #[source]
    pub last_cause: renderer::RenderError,
}

/// Result type alias for Startup-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, DetailExtractor, Harvester, LinkCollector, ResilientNavigator};
pub use model::{LinkEntry, LinkSet, Record, NO_INFO_FOUND};
pub use renderer::{Document, RenderError, RenderSession, SessionLauncher};
