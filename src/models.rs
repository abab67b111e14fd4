// =============================================================================
// models.rs — THE SHAPES THAT CROSS THE WIRE
// =============================================================================
//
// Two record shapes leave this process: a TrendItem (one ranked entry) and a
// TrendBatch (up to ten of them, tagged with where and when they came from).
// Everything else in here is the raw JSON some provider hands us before we
// squeeze it into those two shapes.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard cap on entries per batch.
pub const MAX_ITEMS: usize = 10;

/// Which upstream a batch came from. The wire tags are the ones the
/// ingestion endpoint already files batches under.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrendSource {
    /// Web-analytics trending searches (Google Trends).
    #[serde(rename = "google")]
    SearchTrends,

    /// Social-media trending topics (X).
    #[serde(rename = "x")]
    SocialTrends,

    /// AI search provider (Perplexity).
    #[serde(rename = "ai")]
    AiTrends,
}

impl TrendSource {
    /// Driver order.
    pub const ALL: [TrendSource; 3] = [
        TrendSource::SearchTrends,
        TrendSource::SocialTrends,
        TrendSource::AiTrends,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            TrendSource::SearchTrends => "google",
            TrendSource::SocialTrends => "x",
            TrendSource::AiTrends => "ai",
        }
    }
}

impl fmt::Display for TrendSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One ranked trending entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendItem {
    /// 1-based, dense within its batch.
    pub rank: u32,
    pub title: String,
    /// What you'd type into a search box. Often identical to `title`.
    pub query: String,
    /// Link to the topic, or empty when the provider has none.
    pub url: String,
}

impl TrendItem {
    pub fn new(rank: u32, title: impl Into<String>, query: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            rank,
            title: title.into(),
            query: query.into(),
            url: url.into(),
        }
    }
}

/// The payload POSTed to the ingestion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendBatch {
    pub source: TrendSource,
    pub country: String,
    pub fetched_at: DateTime<Utc>,
    pub top: Vec<TrendItem>,
}

impl TrendBatch {
    /// Stamp a batch with the current time. Anything past [`MAX_ITEMS`] is dropped.
    pub fn new(source: TrendSource, country: impl Into<String>, items: &[TrendItem]) -> Self {
        Self::at(source, country, items, Utc::now())
    }

    pub fn at(
        source: TrendSource,
        country: impl Into<String>,
        items: &[TrendItem],
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            country: country.into(),
            fetched_at,
            top: items.iter().take(MAX_ITEMS).cloned().collect(),
        }
    }
}

impl fmt::Display for TrendBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({} items @ {})",
            self.source,
            self.country,
            self.top.len(),
            self.fetched_at.to_rfc3339()
        )
    }
}

// =============================================================================
// Raw provider payloads
// =============================================================================

/// One element of the X `trends/place.json` response. The API returns an
/// array of these, and in practice only the first one matters.
#[derive(Debug, Clone, Deserialize)]
pub struct XTrendLocation {
    #[serde(default)]
    pub trends: Option<Vec<XTrend>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct XTrend {
    pub name: Option<String>,
    pub query: Option<String>,
    pub url: Option<String>,
}

/// Request body for the AI search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AiSearchRequest {
    pub query: String,
}
