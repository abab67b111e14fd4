// =============================================================================
// sources/mod.rs — THE THREE LISTENING POSTS
// =============================================================================
//
// Each source takes a country code and hands back a FetchOutcome. They share
// nothing but that contract: different auth, different payloads, different
// ways of falling over. Whatever goes wrong stays in here. The driver only
// ever sees Fetched, Skipped or Failed, and only cares about the items.
// =============================================================================

pub mod ai_trends;
pub mod search_trends;
pub mod social_trends;

use std::fmt;

use crate::error::SourceError;
use crate::models::{TrendItem, MAX_ITEMS};

/// Why a source declined to run for a country. Informational, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The provider credential is not configured.
    MissingCredential(&'static str),
    /// The registry has no identifier this provider understands.
    NoRegionMapping { country: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingCredential(key) => write!(f, "{key} not present"),
            SkipReason::NoRegionMapping { country } => {
                write!(f, "no region mapping for {country}")
            }
        }
    }
}

/// What a single (source, country) fetch produced.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The provider answered. May legitimately be empty.
    Fetched(Vec<TrendItem>),
    Skipped(SkipReason),
    Failed(SourceError),
}

impl FetchOutcome {
    /// Collapse to the item list the driver pushes. Skips and failures are empty.
    pub fn into_items(self) -> Vec<TrendItem> {
        match self {
            FetchOutcome::Fetched(items) => items,
            FetchOutcome::Skipped(_) | FetchOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

/// Raw (title, query, url) triple before ranking.
pub type RawEntry = (String, String, String);

/// Keep the first [`MAX_ITEMS`] entries and number them 1, 2, 3, …
pub fn rank_entries<I>(entries: I) -> Vec<TrendItem>
where
    I: IntoIterator<Item = RawEntry>,
{
    entries
        .into_iter()
        .take(MAX_ITEMS)
        .zip(1u32..)
        .map(|((title, query, url), rank)| TrendItem { rank, title, query, url })
        .collect()
}

/// Treat `None` and `""` the same way.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
