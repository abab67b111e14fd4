// =============================================================================
// social_trends.rs — WHAT THE TIMELINE IS YELLING ABOUT
// =============================================================================
//
// X's v1.1 trends API. One GET per country:
//
//   GET {base}/1.1/trends/place.json?id=<WOEID>
//   Authorization: Bearer <token>
//
// The response is an array of "locations", and the first one carries a
// `trends` list of { name, query, url, ... }. We keep the first ten.
//
// Two things make us skip without touching the network: no bearer token
// configured, or a country the registry has no WOEID for (China, Japan and
// Korea, at the moment).
// =============================================================================

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::countries;
use crate::error::SourceError;
use crate::models::{TrendItem, XTrendLocation};
use crate::sources::{non_empty, rank_entries, FetchOutcome, SkipReason};

pub struct SocialTrendsAdapter {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl SocialTrendsAdapter {
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.x_base_url.clone(),
            bearer_token: config.x_bearer_token.clone(),
        })
    }

    pub async fn fetch(&self, country: &str) -> FetchOutcome {
        let Some(token) = self.bearer_token.as_deref() else {
            info!(country, "Social trends: X_BEARER_TOKEN not present — skipping");
            return FetchOutcome::Skipped(SkipReason::MissingCredential("X_BEARER_TOKEN"));
        };

        let Some(place_id) = countries::place_id_for(country) else {
            info!(country, "Social trends: no WOEID mapping — skipping");
            return FetchOutcome::Skipped(SkipReason::NoRegionMapping {
                country: country.to_string(),
            });
        };

        match self.request(token, place_id).await {
            Ok(items) => {
                debug!(country, place_id, items = items.len(), "Social trends: fetched");
                FetchOutcome::Fetched(items)
            }
            Err(e) => {
                warn!(country, place_id, error = %e, "Social trends: fetch failed");
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn request(&self, token: &str, place_id: u64) -> Result<Vec<TrendItem>, SourceError> {
        let url = format!("{}/1.1/trends/place.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("id", place_id)])
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::status(status.as_u16(), &body));
        }

        let locations: Vec<XTrendLocation> = serde_json::from_str(&body)?;
        let first = locations
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Shape("empty location list".into()))?;

        Ok(normalize(first))
    }
}

/// Title falls back name → query → "", query falls back query → title.
fn normalize(location: XTrendLocation) -> Vec<TrendItem> {
    rank_entries(location.trends.unwrap_or_default().into_iter().map(|t| {
        let name = non_empty(t.name);
        let query = non_empty(t.query);
        let title = name.or_else(|| query.clone()).unwrap_or_default();
        let query = query.unwrap_or_else(|| title.clone());
        (title, query, t.url.unwrap_or_default())
    }))
}
