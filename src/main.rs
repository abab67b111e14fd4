// =============================================================================
// main.rs — TREND RELAY
// =============================================================================
//
// Search trends, social trends and an AI provider, for nine countries,
// normalized and pushed to one ingestion endpoint. Something external runs
// us on a schedule; we do one pass and exit.
// =============================================================================

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use trend_relay::countries::COUNTRIES;
use trend_relay::sources::search_trends::GoogleTrendsClient;
use trend_relay::{Config, Driver};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_target(true)
        .init();

    let config = Config::from_env();
    info!(
        push_enabled = config.push_enabled(),
        social_enabled = config.x_bearer_token.is_some(),
        ai_enabled = config.perplexity_key.is_some(),
        countries = COUNTRIES.len(),
        "Trend relay starting"
    );

    let trends = GoogleTrendsClient::new(&config).context("building search-trends client")?;
    let driver = Driver::new(&config, Arc::new(trends)).context("building HTTP clients")?;

    let summary = driver.run_once(COUNTRIES).await;
    info!(pushes = summary.pushes(), delivered = summary.delivered, "Trend relay finished");

    Ok(())
}
