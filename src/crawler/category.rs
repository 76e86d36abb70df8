//! Team categories on the listing pages
//!
//! Every team link on the listing lives under one of a fixed set of path
//! segments below the site's team root. They are equivalent as record
//! sources; the category only decides whether an anchor is a team link.

use std::fmt;

/// Known team categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamCategory {
    SeedFund,
    Ideation,
    AngelFund,
}

impl TeamCategory {
    pub const ALL: [TeamCategory; 3] = [Self::SeedFund, Self::Ideation, Self::AngelFund];

    /// Path segment under the team root, e.g. `seed-fund-teams`
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::SeedFund => "seed-fund-teams",
            Self::Ideation => "ideation-teams",
            Self::AngelFund => "angel-fund-teams",
        }
    }

    /// Full path prefix for this category, e.g. `/hktech300/start-ups/seed-fund-teams/`
    pub fn path_prefix(&self, team_root: &str) -> String {
        format!("{}{}/", team_root, self.path_segment())
    }
}

impl fmt::Display for TeamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Classification of an anchor found on a listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    Team(TeamCategory),
    /// Navigation, footer and every other non-team link
    Unknown,
}

impl AnchorKind {
    pub fn is_team(&self) -> bool {
        matches!(self, Self::Team(_))
    }
}

/// Classifies an href by the category prefix it contains
pub fn classify_href(href: &str, team_root: &str) -> AnchorKind {
    TeamCategory::ALL
        .into_iter()
        .find(|category| href.contains(&category.path_prefix(team_root)))
        .map(AnchorKind::Team)
        .unwrap_or(AnchorKind::Unknown)
}

/// CSS selector group matching an anchor of any known category
pub fn team_anchor_selector(team_root: &str) -> String {
    TeamCategory::ALL
        .iter()
        .map(|category| format!("a[href*='{}']", category.path_prefix(team_root)))
        .collect::<Vec<_>>()
        .join(", ")
}
