// =============================================================================
// push.rs — THE OUTBOX
// =============================================================================
//
// Takes a normalized batch and POSTs it to the ingestion endpoint:
//
//   POST <HOSTINGER_PUSH_URL>
//   Authorization: Bearer <TRENDING_AUTH_TOKEN>
//   Content-Type: application/json
//   <TrendBatch as JSON>
//
// At-most-once. A 2xx is a delivery, anything else is logged and forgotten.
// There is no retry, no queue, no second chance. The next scheduled run will
// have fresher data anyway.
//
// If the destination URL or token is missing we never open a connection.
// That's a configuration problem, not a delivery failure.
// =============================================================================

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{TrendBatch, TrendItem, TrendSource};

/// Result of one push attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Endpoint answered 2xx.
    Delivered { status: u16 },
    /// Endpoint answered, but not with a 2xx.
    Rejected { status: u16 },
    /// Destination not configured. No request was made.
    NotSent,
    /// Transport-level failure: timeout, refused connection, bad TLS.
    Failed(String),
}

impl PushOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PushOutcome::Delivered { .. })
    }
}

struct Destination {
    url: String,
    token: String,
}

pub struct PushClient {
    http: reqwest::Client,
    destination: Option<Destination>,
}

impl PushClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.push_timeout)
            .build()?;

        let destination = match (&config.push_url, &config.push_token) {
            (Some(url), Some(token)) => Some(Destination {
                url: url.clone(),
                token: token.clone(),
            }),
            _ => None,
        };

        Ok(Self { http, destination })
    }

    /// Wrap `items` in a freshly stamped batch and send it.
    pub async fn push(&self, source: TrendSource, country: &str, items: &[TrendItem]) -> PushOutcome {
        self.push_batch(&TrendBatch::new(source, country, items)).await
    }

    pub async fn push_batch(&self, batch: &TrendBatch) -> PushOutcome {
        let Some(dest) = &self.destination else {
            info!(
                source = %batch.source,
                country = %batch.country,
                "HOSTINGER_PUSH_URL or TRENDING_AUTH_TOKEN missing — not pushing"
            );
            return PushOutcome::NotSent;
        };

        debug!(batch = %batch, url = %dest.url, "Pushing batch");

        let response = match self
            .http
            .post(&dest.url)
            .bearer_auth(&dest.token)
            .json(batch)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    source = %batch.source,
                    country = %batch.country,
                    error = %e,
                    "Push error — batch dropped"
                );
                return PushOutcome::Failed(e.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = read_body(response).await;

        if (200..300).contains(&status) {
            info!(
                source = %batch.source,
                country = %batch.country,
                status,
                items = batch.top.len(),
                response = %body,
                "Push delivered"
            );
            PushOutcome::Delivered { status }
        } else {
            warn!(
                source = %batch.source,
                country = %batch.country,
                status,
                response = %body,
                "Push rejected by endpoint — batch dropped"
            );
            PushOutcome::Rejected { status }
        }
    }
}

/// Response body for the log line. A failed read is reported, not swallowed.
async fn read_body(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<body unreadable: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{any, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with(url: Option<String>, token: Option<&str>) -> Config {
        let token = token.map(str::to_string);
        Config::from_lookup(move |key| match key {
            "HOSTINGER_PUSH_URL" => url.clone(),
            "TRENDING_AUTH_TOKEN" => token.clone(),
            _ => None,
        })
    }

    fn sample_items() -> Vec<TrendItem> {
        vec![
            TrendItem::new(1, "Foo", "foo query", "http://x"),
            TrendItem::new(2, "Bar", "Bar", ""),
        ]
    }

    #[tokio::test]
    async fn test_delivered_on_200_and_body_matches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/trending_receiver.php"))
            .and(header("Authorization", "Bearer push-token"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/trending_receiver.php", server.uri());
        let client = PushClient::new(&config_with(Some(url), Some("push-token"))).unwrap();

        let outcome = client.push(TrendSource::SocialTrends, "US", &sample_items()).await;
        assert_eq!(outcome, PushOutcome::Delivered { status: 200 });

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let batch: TrendBatch = requests[0].body_json().unwrap();
        assert_eq!(batch.source, TrendSource::SocialTrends);
        assert_eq!(batch.country, "US");
        assert_eq!(batch.top, sample_items());
    }

    #[tokio::test]
    async fn test_missing_token_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = PushClient::new(&config_with(Some(server.uri()), None)).unwrap();
        let outcome = client.push(TrendSource::SearchTrends, "IN", &sample_items()).await;
        assert_eq!(outcome, PushOutcome::NotSent);
    }

    #[tokio::test]
    async fn test_missing_url_is_not_sent() {
        let client = PushClient::new(&config_with(None, Some("push-token"))).unwrap();
        let outcome = client.push(TrendSource::SearchTrends, "IN", &sample_items()).await;
        assert_eq!(outcome, PushOutcome::NotSent);
        assert!(!outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_server_error_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database on fire"))
            .expect(1)
            .mount(&server)
            .await;

        let client = PushClient::new(&config_with(Some(server.uri()), Some("t"))).unwrap();
        let outcome = client.push(TrendSource::AiTrends, "FR", &sample_items()).await;
        assert_eq!(outcome, PushOutcome::Rejected { status: 500 });
        assert!(!outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_other_2xx_counts_as_delivered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = PushClient::new(&config_with(Some(server.uri()), Some("t"))).unwrap();
        let outcome = client.push(TrendSource::SearchTrends, "DE", &sample_items()).await;
        assert!(outcome.is_delivered());
    }

    #[tokio::test]
    async fn test_timeout_is_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let mut config = config_with(Some(server.uri()), Some("t"));
        config.push_timeout = Duration::from_millis(200);
        let client = PushClient::new(&config).unwrap();

        let outcome = client.push(TrendSource::SearchTrends, "CA", &sample_items()).await;
        assert!(matches!(outcome, PushOutcome::Failed(_)));
    }

    /// One-shot HTTP server that promises 100 body bytes and hangs up after 5.
    async fn truncated_body_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nshort")
                .await
                .unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_unreadable_body_is_reported() {
        let url = truncated_body_server().await;
        let response = reqwest::get(&url).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let body = read_body(response).await;
        assert!(body.starts_with("<body unreadable:"), "got {body:?}");
    }
}
