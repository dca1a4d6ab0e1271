//! Webhook sink — POSTs each event as JSON to a configured endpoint
//! (an Apps-Script spreadsheet endpoint in the original deployment).

use async_trait::async_trait;

use crate::error::SinkError;
use crate::events::record::StageEvent;
use crate::events::sink::EventSink;

pub struct WebhookSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EventSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, event: &StageEvent) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(|e| SinkError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SinkError::DeliveryFailed {
                name: "webhook".to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }
        tracing::debug!("Delivered event {} to webhook", event.kind);
        Ok(())
    }
}
