//! Data model for harvested entities
//!
//! - `LinkEntry` / `LinkSet`: team links discovered on listing pages, deduplicated
//!   by a normalized identity key
//! - `Record`: one extracted row per link, with the final four-tuple dedup pass

mod link;
mod record;

pub use link::{LinkEntry, LinkKey, LinkSet};
pub use record::{dedup_records, Record, NO_INFO_FOUND};
