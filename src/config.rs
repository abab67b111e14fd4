// =============================================================================
// config.rs — THE KNOB DRAWER
// =============================================================================
//
// Everything the relay needs to know about the outside world comes from the
// process environment: where to push, which bearer tokens we hold, and which
// upstream hosts to talk to. Missing provider keys are not errors. They just
// switch the matching source off for this run.
//
// The config is built exactly once in main() and handed down by reference.
// Nothing below this module reads the environment on its own.
// =============================================================================

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// Every tunable parameter of a relay pass.
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // INGESTION ENDPOINT
    // =========================================================================

    /// Where normalized batches get POSTed. `None` disables every push, but
    /// the sources still run and log what they found.
    pub push_url: Option<String>,

    /// Bearer token for the ingestion endpoint. Same rules as `push_url`.
    pub push_token: Option<String>,

    // =========================================================================
    // PROVIDER CREDENTIALS
    // =========================================================================

    /// Bearer token for the social-trends (X) API. Absent = source disabled.
    pub x_bearer_token: Option<String>,

    /// API key for the AI search provider. Absent = source disabled.
    pub perplexity_key: Option<String>,

    // =========================================================================
    // UPSTREAM HOSTS
    // Overridable so tests (and the occasional proxy) can point us elsewhere.
    // =========================================================================

    pub trends_base_url: String,
    pub x_base_url: String,
    pub ai_base_url: String,

    // =========================================================================
    // SEARCH-TRENDS CLIENT PARAMETERS
    // =========================================================================

    /// Interface language passed to the trends service. Default: en-US.
    pub trends_language: String,

    /// Timezone offset in minutes. Default: 330 (IST).
    pub trends_tz_offset: i32,

    // =========================================================================
    // PACING AND TIMEOUTS
    // =========================================================================

    /// Per-request timeout for provider fetches. Default: 20 seconds.
    pub fetch_timeout: Duration,

    /// Timeout for a single push. Default: 30 seconds.
    pub push_timeout: Duration,

    /// Pause after every push so we don't burst the endpoint or the
    /// providers. Default: 1 second.
    pub pause: Duration,
}

impl Config {
    /// Load configuration from the process environment, after giving a `.env`
    /// file the chance to populate it.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as
    /// absent, unparseable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let push_url = get("HOSTINGER_PUSH_URL").and_then(|raw| match validate_push_url(&raw) {
            Some(url) => Some(url),
            None => {
                warn!(value = %raw, "HOSTINGER_PUSH_URL is not an absolute http(s) URL — pushes disabled");
                None
            }
        });

        Config {
            push_url,
            push_token: get("TRENDING_AUTH_TOKEN"),

            x_bearer_token: get("X_BEARER_TOKEN"),
            perplexity_key: get("PERPLEXITY_KEY"),

            trends_base_url: trim_base(or_default("TREND_RELAY_TRENDS_BASE_URL", "https://trends.google.com")),
            x_base_url: trim_base(or_default("TREND_RELAY_X_BASE_URL", "https://api.twitter.com")),
            ai_base_url: trim_base(or_default("TREND_RELAY_AI_BASE_URL", "https://api.perplexity.ai")),

            trends_language: or_default("TREND_RELAY_TRENDS_LANGUAGE", "en-US"),
            trends_tz_offset: or_default("TREND_RELAY_TRENDS_TZ_OFFSET", "330")
                .parse()
                .unwrap_or(330),

            fetch_timeout: Duration::from_secs(
                or_default("TREND_RELAY_FETCH_TIMEOUT_SECS", "20").parse().unwrap_or(20),
            ),
            push_timeout: Duration::from_secs(
                or_default("TREND_RELAY_PUSH_TIMEOUT_SECS", "30").parse().unwrap_or(30),
            ),
            pause: Duration::from_millis(
                or_default("TREND_RELAY_PAUSE_MS", "1000").parse().unwrap_or(1000),
            ),
        }
    }

    /// True when both halves of the push destination are configured.
    pub fn push_enabled(&self) -> bool {
        self.push_url.is_some() && self.push_token.is_some()
    }
}

fn validate_push_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Some(parsed.to_string()),
        _ => None,
    }
}

/// Base URLs get paths appended with a leading slash, so drop any trailing one.
fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
