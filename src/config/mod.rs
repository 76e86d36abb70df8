//! Configuration module for Startup-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys have defaults, so an empty file (or no file at all) describes the
//! stock HK Tech 300 run.
//!
//! # Example
//!
//! ```no_run
//! use startup_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Listing pages to visit: {}", config.crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, OutputConfig, RendererConfig, RendererKind, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
