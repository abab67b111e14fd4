// =============================================================================
// ai_trends.rs — ASKING A ROBOT WHAT'S TRENDING
// =============================================================================
//
// An AI search provider gets a plain-English question:
//
//   POST {base}/search
//   Authorization: Bearer <key>
//   Content-Type: application/json
//   {"query": "Top trending search queries in <CODE>"}
//
// The provider's answer format is not pinned down anywhere we trust, so the
// step from response JSON to trend entries is a pluggable ResponseMapping.
// The default, UnmappedResponse, maps everything to nothing. With it this
// source exercises auth, transport and error handling end to end and still
// never pushes a batch. Plug in a real mapping once the contract is known.
// =============================================================================

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::SourceError;
use crate::models::{AiSearchRequest, TrendItem};
use crate::sources::{rank_entries, FetchOutcome, RawEntry, SkipReason};

/// Turns a provider response body into raw (title, query, url) entries,
/// most relevant first. Ranking and truncation happen afterwards.
pub trait ResponseMapping: Send + Sync {
    fn map(&self, body: &serde_json::Value) -> Vec<RawEntry>;

    /// Whether this mapping actually understands the provider. Only used
    /// to pick the right log line.
    fn is_implemented(&self) -> bool {
        true
    }
}

/// The default: the provider contract is unknown, so nothing is extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnmappedResponse;

impl ResponseMapping for UnmappedResponse {
    fn map(&self, _body: &serde_json::Value) -> Vec<RawEntry> {
        Vec::new()
    }

    fn is_implemented(&self) -> bool {
        false
    }
}

pub struct AiTrendsAdapter {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    mapping: Box<dyn ResponseMapping>,
}

impl AiTrendsAdapter {
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        Self::with_mapping(config, Box::new(UnmappedResponse))
    }

    pub fn with_mapping(config: &Config, mapping: Box<dyn ResponseMapping>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/search", config.ai_base_url),
            api_key: config.perplexity_key.clone(),
            mapping,
        })
    }

    pub async fn fetch(&self, country: &str) -> FetchOutcome {
        let Some(key) = self.api_key.as_deref() else {
            info!(country, "AI trends: PERPLEXITY_KEY not present — skipping");
            return FetchOutcome::Skipped(SkipReason::MissingCredential("PERPLEXITY_KEY"));
        };

        match self.request(key, country).await {
            Ok(items) => {
                if items.is_empty() && !self.mapping.is_implemented() {
                    debug!(country, "AI trends: response received, no mapping configured — nothing to push");
                } else {
                    debug!(country, items = items.len(), "AI trends: fetched");
                }
                FetchOutcome::Fetched(items)
            }
            Err(e) => {
                warn!(country, error = %e, "AI trends: fetch failed");
                FetchOutcome::Failed(e)
            }
        }
    }

    async fn request(&self, key: &str, country: &str) -> Result<Vec<TrendItem>, SourceError> {
        let payload = AiSearchRequest {
            query: prompt_for(country),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::status(status.as_u16(), &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(rank_entries(self.mapping.map(&value)))
    }
}

pub fn prompt_for(country: &str) -> String {
    format!("Top trending search queries in {country}")
}
