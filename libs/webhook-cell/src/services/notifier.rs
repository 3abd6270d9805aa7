use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;

use crate::models::{DeliveryOutcome, WebhookEnvelope, WebhookError};

/// Best-effort, at-most-once delivery of booking events to an external system.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    destination: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_destination(config.webhook_url.clone())
    }

    pub fn with_destination(destination: Option<String>) -> Self {
        Self {
            client: Client::new(),
            destination,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.destination.is_some()
    }

    /// POST the envelope and wait for the answer. A non-2xx status is an error.
    pub async fn deliver<T: Serialize>(
        &self,
        envelope: &WebhookEnvelope<T>,
    ) -> Result<DeliveryOutcome, WebhookError> {
        let Some(url) = self.destination.as_deref() else {
            warn!("Webhook URL not configured, skipping {} notification", envelope.event);
            return Ok(DeliveryOutcome::Skipped);
        };

        let body = serde_json::to_value(envelope)?;
        post_envelope(&self.client, url, &body).await?;

        Ok(DeliveryOutcome::Delivered)
    }

    /// Fire-and-forget delivery on a spawned task. Failures are logged and dropped.
    ///
    /// Returns the task handle so callers that care (tests, shutdown) can await it.
    pub fn notify<T: Serialize>(&self, envelope: &WebhookEnvelope<T>) -> Option<JoinHandle<()>> {
        let Some(url) = self.destination.clone() else {
            warn!("Webhook URL not configured, skipping {} notification", envelope.event);
            return None;
        };

        let body = match serde_json::to_value(envelope) {
            Ok(body) => body,
            Err(e) => {
                error!("Failed to serialize {} webhook: {}", envelope.event, e);
                return None;
            }
        };

        let client = self.client.clone();
        let event = envelope.event;

        Some(tokio::spawn(async move {
            match post_envelope(&client, &url, &body).await {
                Ok(()) => info!("Webhook {} sent successfully", event),
                Err(e) => error!("Failed to send webhook {}: {}", event, e),
            }
        }))
    }
}

async fn post_envelope(client: &Client, url: &str, body: &Value) -> Result<(), WebhookError> {
    debug!("Posting webhook to {}", url);

    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(WebhookError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    Ok(())
}
