// =============================================================================
// error.rs — EVERYTHING THAT CAN GO WRONG UPSTREAM
// =============================================================================
//
// None of these ever escape an adapter. They get logged, wrapped in a
// FetchOutcome::Failed, and the driver moves on to the next source.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection refused, DNS failure, timeout, TLS trouble.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered, but not with a 2xx.
    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the JSON we were promised.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Valid JSON, wrong structure.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// The tabular search-trends result came back without a single row.
    #[error("no trending rows for locale '{0}'")]
    NoRows(String),
}

impl SourceError {
    /// Build a [`SourceError::Status`], clipping the body so a provider's HTML
    /// error page doesn't flood the log.
    pub fn status(status: u16, body: &str) -> Self {
        const MAX_BODY: usize = 512;
        let body = match body.char_indices().nth(MAX_BODY) {
            Some((idx, _)) => format!("{}…", &body[..idx]),
            None => body.to_string(),
        };
        SourceError::Status { status, body }
    }
}
