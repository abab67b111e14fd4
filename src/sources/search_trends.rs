// =============================================================================
// search_trends.rs — WHAT THE WORLD IS TYPING INTO SEARCH BOXES
// =============================================================================
//
// The search-trends source asks a trends service for a region's "trending
// searches" list. The service answers with a one-column table: one search
// phrase per row, most popular first. We keep the top ten and use the phrase
// as both the title and the query. There's no link to speak of.
//
// The upstream call sits behind the TrendsClient trait. Production uses the
// HTTP-backed GoogleTrendsClient; tests swap in whatever table they like.
//
// No credential is needed here, so this source never skips. It either
// produces rows or fails, and an empty table counts as a failure.
// =============================================================================

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::countries;
use crate::error::SourceError;
use crate::sources::{rank_entries, FetchOutcome};

/// Parameters of one trending-searches request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingQuery {
    /// Locale slug, e.g. `india`.
    pub locale: String,
    /// Interface language, e.g. `en-US`.
    pub language: String,
    /// Timezone offset in minutes.
    pub tz_offset: i32,
}

/// Tabular result of a trending-searches call. Only the first column is
/// meaningful today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendingTable {
    pub rows: Vec<Vec<String>>,
}

impl TrendingTable {
    /// Build a single-column table.
    pub fn single_column<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: values.into_iter().map(|v| vec![v.into()]).collect(),
        }
    }

    pub fn first_column(self) -> impl Iterator<Item = String> {
        self.rows.into_iter().filter_map(|row| row.into_iter().next())
    }
}

/// The upstream trends service.
#[async_trait]
pub trait TrendsClient: Send + Sync {
    async fn trending_searches(&self, query: &TrendingQuery) -> Result<TrendingTable, SourceError>;
}

/// Talks to the trends service's internal "hot trends" data endpoint, which
/// returns a JSON object keyed by locale slug:
/// `{"india": ["phrase one", "phrase two", ...], "japan": [...], ...}`
pub struct GoogleTrendsClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GoogleTrendsClient {
    const DATA_PATH: &'static str = "/trends/hottrends/visualize/internal/data";

    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(concat!("trend_relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", config.trends_base_url, Self::DATA_PATH),
        })
    }
}

#[async_trait]
impl TrendsClient for GoogleTrendsClient {
    async fn trending_searches(&self, query: &TrendingQuery) -> Result<TrendingTable, SourceError> {
        debug!(
            endpoint = %self.endpoint,
            locale = %query.locale,
            hl = %query.language,
            tz = query.tz_offset,
            "Search trends: requesting trending searches"
        );

        let tz = query.tz_offset.to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("hl", query.language.as_str()), ("tz", tz.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::status(status.as_u16(), &body));
        }

        let mut by_locale: HashMap<String, Vec<String>> = serde_json::from_str(&body)?;
        let phrases = by_locale.remove(&query.locale).ok_or_else(|| {
            SourceError::Shape(format!("locale '{}' missing from trending data", query.locale))
        })?;

        Ok(TrendingTable::single_column(phrases))
    }
}

/// Country code in, up to ten ranked search phrases out.
pub struct SearchTrendsAdapter {
    client: Arc<dyn TrendsClient>,
    language: String,
    tz_offset: i32,
}

impl SearchTrendsAdapter {
    pub fn new(client: Arc<dyn TrendsClient>, config: &Config) -> Self {
        Self {
            client,
            language: config.trends_language.clone(),
            tz_offset: config.trends_tz_offset,
        }
    }

    pub async fn fetch(&self, country: &str) -> FetchOutcome {
        let locale = countries::locale_for(country);
        if countries::lookup(country).is_none() {
            info!(country, locale, "Search trends: no locale for country — using default");
        }

        let query = TrendingQuery {
            locale: locale.to_string(),
            language: self.language.clone(),
            tz_offset: self.tz_offset,
        };

        let table = match self.client.trending_searches(&query).await {
            Ok(table) => table,
            Err(e) => {
                warn!(country, locale, error = %e, "Search trends: upstream error");
                return FetchOutcome::Failed(e);
            }
        };

        let items = rank_entries(
            table
                .first_column()
                .map(|phrase| (phrase.clone(), phrase, String::new())),
        );

        if items.is_empty() {
            let err = SourceError::NoRows(locale.to_string());
            warn!(country, locale, error = %err, "Search trends: empty result");
            return FetchOutcome::Failed(err);
        }

        debug!(country, locale, items = items.len(), "Search trends: fetched");
        FetchOutcome::Fetched(items)
    }
}

/// Test doubles for the upstream trends client.
#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    pub struct CountingClient {
        pub result: fn() -> Result<TrendingTable, SourceError>,
        pub calls: AtomicUsize,
        pub last_query: Mutex<Option<TrendingQuery>>,
    }

    impl CountingClient {
        pub fn new(result: fn() -> Result<TrendingTable, SourceError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TrendsClient for CountingClient {
        async fn trending_searches(&self, query: &TrendingQuery) -> Result<TrendingTable, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            (self.result)()
        }
    }
}
