//! HTTP leaderboard endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use livebench_core::model::parse_rows;
use livebench_core::{BenchmarkRow, DataUnavailable, RowSource};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/leaderboard";
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Fetches the leaderboard from a JSON endpoint.
pub struct HttpSource {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    retry_delay: Duration,
}

impl HttpSource {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
            timeout,
            max_retries: 0,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Retry transient failures up to `max_retries` times, doubling the delay
    /// between attempts.
    pub fn with_retries(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    async fn fetch_once(&self) -> Result<Vec<BenchmarkRow>, DataUnavailable> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataUnavailable::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        parse_rows(&bytes)
    }

    fn classify(&self, e: reqwest::Error) -> DataUnavailable {
        if e.is_timeout() {
            DataUnavailable::Timeout(self.timeout.as_millis() as u64)
        } else if e.is_connect() {
            DataUnavailable::Network(format!(
                "leaderboard endpoint not reachable at {}",
                self.endpoint
            ))
        } else {
            DataUnavailable::Network(e.to_string())
        }
    }
}

#[async_trait]
impl RowSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_rows(&self) -> Result<Vec<BenchmarkRow>, DataUnavailable> {
        let mut delay = self.retry_delay;
        let mut attempt = 0;
        loop {
            match self.fetch_once().await {
                Ok(rows) => return Ok(rows),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max = self.max_retries,
                        error = %e,
                        "leaderboard fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livebench_core::traits::load_snapshot;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn leaderboard_body() -> serde_json::Value {
        serde_json::json!([
            {
                "Model": "GPT-X",
                "Organization": "OpenAI",
                "Global Average": 80.0,
                "Reasoning Average": 70.1,
                "Coding Average": null,
                "Agentic Coding Average": 33.3,
                "Mathematics Average": 75.0,
                "Data Analysis Average": 60.0,
                "Language Average": 58.0,
                "IF Average": 81.0
            },
            {
                "Model": "Claude-Y",
                "Organization": "Anthropic",
                "Global Average": 60.0,
                "Reasoning Average": null,
                "Coding Average": 71.0,
                "Agentic Coding Average": null,
                "Mathematics Average": null,
                "Data Analysis Average": null,
                "Language Average": null,
                "IF Average": null
            }
        ])
    }

    fn source(server: &MockServer) -> HttpSource {
        HttpSource::new(
            &format!("{}/leaderboard", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn successful_fetch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(leaderboard_body()))
            .mount(&server)
            .await;

        let rows = source(&server).fetch_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model, "GPT-X");
        assert_eq!(rows[0].coding_average, 0.0);
        assert_eq!(rows[1].organization, "Anthropic");
        assert_eq!(rows[1].coding_average, 71.0);
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(500).set_body_string("db down"))
            .mount(&server)
            .await;

        let err = source(&server).fetch_rows().await.unwrap_err();
        assert!(matches!(err, DataUnavailable::Status { status: 500, .. }));
        assert!(err.to_string().contains("db down"));
    }

    #[tokio::test]
    async fn malformed_body_degrades_to_empty_snapshot() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let source = source(&server);
        assert!(matches!(
            source.fetch_rows().await,
            Err(DataUnavailable::Malformed(_))
        ));
        assert!(load_snapshot(&source).await.is_empty());
    }

    #[tokio::test]
    async fn transient_failure_is_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(leaderboard_body()))
            .mount(&server)
            .await;

        let rows = source(&server)
            .with_retries(3, Duration::from_millis(1))
            .fetch_rows()
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn permanent_failure_is_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = source(&server)
            .with_retries(3, Duration::from_millis(1))
            .fetch_rows()
            .await;
        assert!(matches!(
            result,
            Err(DataUnavailable::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/leaderboard"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(leaderboard_body())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let source = HttpSource::new(
            &format!("{}/leaderboard", server.uri()),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(err, DataUnavailable::Timeout(200)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        // Port 9 (discard) is closed on test machines.
        let source =
            HttpSource::new("http://127.0.0.1:9/leaderboard", Duration::from_secs(2)).unwrap();
        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(
            err,
            DataUnavailable::Network(_) | DataUnavailable::Timeout(_)
        ));
    }
}
