use crate::model::LinkEntry;
use std::collections::HashSet;

/// Marker written for a field that is absent, filtered out, or could not be fetched
pub const NO_INFO_FOUND: &str = "No Info Found";

/// One output row: a team and the contact details found on its detail page
///
/// `None` in `website`/`email` is rendered as [`NO_INFO_FOUND`]. It covers both
/// "the page had no such link" and "the page could not be loaded"; the two are
/// deliberately not distinguished in the output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub name: String,
    pub source_url: String,
    pub website: Option<String>,
    pub email: Option<String>,
}

impl Record {
    /// Builds a record for a link whose detail page was extracted
    pub fn extracted(link: &LinkEntry, website: Option<String>, email: Option<String>) -> Self {
        Self {
            name: link.display_name().to_string(),
            source_url: link.target_url().to_string(),
            website,
            email,
        }
    }

    /// Builds the stand-in record for a link whose detail page never loaded
    pub fn placeholder(link: &LinkEntry) -> Self {
        Self::extracted(link, None, None)
    }

    pub fn is_placeholder(&self) -> bool {
        self.website.is_none() && self.email.is_none()
    }

    pub fn website_or_sentinel(&self) -> &str {
        self.website.as_deref().unwrap_or(NO_INFO_FOUND)
    }

    pub fn email_or_sentinel(&self) -> &str {
        self.email.as_deref().unwrap_or(NO_INFO_FOUND)
    }
}

/// Drops records whose (name, source URL, website, email) tuple was already seen
///
/// Exact comparison, no normalization; the first occurrence is kept in place.
pub fn dedup_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
