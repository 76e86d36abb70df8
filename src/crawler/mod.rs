//! Crawler module: listing traversal and detail extraction
//!
//! This module contains the harvest logic, including:
//! - Retrying page loads behind a restartable renderer session
//! - Classifying and collecting team links from listing pages
//! - Extracting contact details from team pages
//! - Overall run coordination

mod category;
mod collector;
mod coordinator;
mod extractor;
mod navigator;
mod parser;

pub use category::{classify_href, team_anchor_selector, AnchorKind, TeamCategory};
pub use collector::{CollectReport, LinkCollector};
pub use coordinator::{run_harvest, Harvester};
pub use extractor::{DetailExtractor, ExtractReport, DETAIL_READY_SELECTOR};
pub use navigator::{ResilientNavigator, RetryPolicy};
pub use parser::{parse_listing, ContactInfo, ContactRules};
