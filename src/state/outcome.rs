/// Outcome definitions for listing pages and detail items
use std::fmt;

/// What happened to one unit of work during a harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    // ===== Listing pages =====
    /// Listing page loaded and its anchors were parsed
    PageLoaded,

    /// Listing page failed every attempt and was skipped
    PageSkipped,

    // ===== Detail items =====
    /// Detail page loaded and fields were extracted
    ItemExtracted,

    /// Detail page failed every attempt; a sentinel record stands in for it
    ItemPlaceholdered,
}

impl Outcome {
    /// Returns true if the unit of work failed to load
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::PageSkipped | Self::ItemPlaceholdered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageLoaded => "page_loaded",
            Self::PageSkipped => "page_skipped",
            Self::ItemExtracted => "item_extracted",
            Self::ItemPlaceholdered => "item_placeholdered",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
