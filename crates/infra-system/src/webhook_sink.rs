// Webhook alert sink
// reason: reqwest for posting alerts to an HTTP endpoint (chat hooks, incident tools)
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use poolwatch_core::domain::Alert;
use poolwatch_core::port::{AlertSink, SinkError};

/// Posts every alert as a JSON body to a fixed URL
pub struct WebhookAlertSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookAlertSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::Transport(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AlertSink for WebhookAlertSink {
    async fn notify(&self, alert: &Alert) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(alert)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected(format!("webhook returned HTTP {}", status)));
        }

        debug!(level = %alert.level, "Webhook alert posted");
        Ok(())
    }
}
