//! URL handling module for Startup-Harvest
//!
//! Resolution of listing hrefs against the site origin, host extraction for
//! scraped website links, and domain-pattern matching for the social denylist.

mod domain;
mod matcher;
mod resolve;

pub use domain::extract_host;
pub use matcher::{matches_any, matches_domain};
pub use resolve::{listing_page_url, normalize_key, resolve_href};
