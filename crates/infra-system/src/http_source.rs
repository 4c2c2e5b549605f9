// HTTP stats source (control endpoint)
// reason: reqwest for the server's JSON stats endpoint
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::stats_document::parse_stats_document;
use poolwatch_core::domain::StatsSnapshot;
use poolwatch_core::port::{StatsSource, StatsSourceError};

/// Polls a stats URL such as `http://127.0.0.1:9293/stats?token=...`
pub struct HttpStatsSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpStatsSource {
    /// Create an HTTP source
    ///
    /// # Arguments
    /// * `url` - Full stats URL including any auth token
    /// * `timeout` - Per-request timeout, a hung endpoint only costs one cycle
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, StatsSourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StatsSourceError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    fn map_error(&self, e: reqwest::Error) -> StatsSourceError {
        if e.is_timeout() {
            StatsSourceError::Timeout(self.timeout.as_millis() as u64)
        } else {
            StatsSourceError::Unavailable(e.to_string())
        }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn snapshot(&self) -> Result<StatsSnapshot, StatsSourceError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsSourceError::Unavailable(format!(
                "stats endpoint returned HTTP {}",
                status
            )));
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!(status = %status, bytes = body.len(), "Stats document fetched");
        parse_stats_document(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_http::{response, serve_once};
    use poolwatch_core::domain::WorkerStatus;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let source =
            HttpStatsSource::new(format!("http://127.0.0.1:{}/stats", port), Duration::from_secs(2))
                .unwrap();
        let result = source.snapshot().await;
        assert!(matches!(
            result,
            Err(StatsSourceError::Unavailable(_)) | Err(StatsSourceError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_ok_response_becomes_snapshot() {
        let body = r#"{"running":8,"backlog":1,"pool_capacity":2,"max_threads":10}"#;
        let (base_url, server) = serve_once(response("200 OK", body)).await;

        let source =
            HttpStatsSource::new(format!("{}/stats?token=abc", base_url), Duration::from_secs(2))
                .unwrap();
        let snapshot = source.snapshot().await.unwrap();
        assert_eq!(snapshot.totals, WorkerStatus::new(8, 1, 2, 10));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /stats?token=abc HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let (base_url, server) =
            serve_once(response("500 Internal Server Error", "{}")).await;

        let source =
            HttpStatsSource::new(format!("{}/stats", base_url), Duration::from_secs(2)).unwrap();
        let result = source.snapshot().await;
        match result {
            Err(StatsSourceError::Unavailable(reason)) => assert!(reason.contains("500")),
            other => panic!("expected Unavailable, got {:?}", other),
        }
        server.await.unwrap();
    }
}
