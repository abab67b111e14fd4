// =============================================================================
// driver.rs — ONE LAP AROUND THE WORLD
// =============================================================================
//
// For every country in registry order: search trends, then social trends,
// then AI trends. Whatever a source returns gets pushed if it's non-empty,
// followed by a short pause so neither the endpoint nor the providers see a
// burst. One pass, strictly sequential, then we're done.
//
// Failures never stop the lap. A dead provider or a grumpy endpoint costs us
// exactly one (source, country) pair.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::countries::Country;
use crate::error::SourceError;
use crate::models::TrendSource;
use crate::push::{PushClient, PushOutcome};
use crate::sources::ai_trends::AiTrendsAdapter;
use crate::sources::search_trends::{SearchTrendsAdapter, TrendsClient};
use crate::sources::social_trends::SocialTrendsAdapter;
use crate::sources::FetchOutcome;

/// Tally of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: u32,
    pub skipped: u32,
    pub failed: u32,
    pub delivered: u32,
    pub rejected: u32,
    pub not_sent: u32,
    pub push_errors: u32,
}

impl RunSummary {
    fn record_fetch(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Fetched(_) => self.fetched += 1,
            FetchOutcome::Skipped(_) => self.skipped += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
        }
    }

    fn record_push(&mut self, outcome: &PushOutcome) {
        match outcome {
            PushOutcome::Delivered { .. } => self.delivered += 1,
            PushOutcome::Rejected { .. } => self.rejected += 1,
            PushOutcome::NotSent => self.not_sent += 1,
            PushOutcome::Failed(_) => self.push_errors += 1,
        }
    }

    /// Number of push attempts, including the ones that never left the process.
    pub fn pushes(&self) -> u32 {
        self.delivered + self.rejected + self.not_sent + self.push_errors
    }
}

pub struct Driver {
    search: SearchTrendsAdapter,
    social: SocialTrendsAdapter,
    ai: AiTrendsAdapter,
    push: PushClient,
    pause: Duration,
}

impl Driver {
    /// Wire every component from one config value.
    pub fn new(config: &Config, trends_client: Arc<dyn TrendsClient>) -> Result<Self, SourceError> {
        Ok(Self {
            search: SearchTrendsAdapter::new(trends_client, config),
            social: SocialTrendsAdapter::new(config)?,
            ai: AiTrendsAdapter::new(config)?,
            push: PushClient::new(config)?,
            pause: config.pause,
        })
    }

    /// Swap the AI source, e.g. for one with a real response mapping.
    pub fn with_ai_adapter(mut self, ai: AiTrendsAdapter) -> Self {
        self.ai = ai;
        self
    }

    async fn fetch(&self, source: TrendSource, country: &str) -> FetchOutcome {
        match source {
            TrendSource::SearchTrends => self.search.fetch(country).await,
            TrendSource::SocialTrends => self.social.fetch(country).await,
            TrendSource::AiTrends => self.ai.fetch(country).await,
        }
    }

    /// Walk `countries` × every source exactly once.
    pub async fn run_once(&self, countries: &[Country]) -> RunSummary {
        let mut summary = RunSummary::default();

        for country in countries {
            info!(country = country.code, "Processing country");

            for source in TrendSource::ALL {
                let outcome = self.fetch(source, country.code).await;
                summary.record_fetch(&outcome);

                let items = outcome.into_items();
                if items.is_empty() {
                    debug!(%source, country = country.code, "Nothing to push");
                    continue;
                }

                let pushed = self.push.push(source, country.code, &items).await;
                summary.record_push(&pushed);

                if !self.pause.is_zero() {
                    tokio::time::sleep(self.pause).await;
                }
            }
        }

        info!(
            countries = countries.len(),
            fetched = summary.fetched,
            skipped = summary.skipped,
            failed = summary.failed,
            delivered = summary.delivered,
            rejected = summary.rejected,
            not_sent = summary.not_sent,
            push_errors = summary.push_errors,
            "Relay pass complete"
        );

        summary
    }
}
