use crate::url::normalize_key;
use std::collections::HashSet;

/// A team link found on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    display_name: String,
    target_url: String,
}

/// Identity of a link: trimmed, lowercased name and URL
pub type LinkKey = (String, String);

impl LinkEntry {
    pub fn new(display_name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            target_url: target_url.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// The key two entries are deduplicated on
    pub fn identity_key(&self) -> LinkKey {
        (
            normalize_key(&self.display_name),
            normalize_key(&self.target_url),
        )
    }
}

/// Insertion-ordered set of links, unique by identity key
///
/// The first representative of a key wins; later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    entries: Vec<LinkEntry>,
    keys: HashSet<LinkKey>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning false if an equal-keyed entry is already present
    pub fn insert(&mut self, entry: LinkEntry) -> bool {
        if !self.keys.insert(entry.identity_key()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for LinkSet {
    type Item = LinkEntry;
    type IntoIter = std::vec::IntoIter<LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a LinkEntry;
    type IntoIter = std::slice::Iter<'a, LinkEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<LinkEntry> for LinkSet {
    fn from_iter<I: IntoIterator<Item = LinkEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

impl Extend<LinkEntry> for LinkSet {
    fn extend<I: IntoIterator<Item = LinkEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}
