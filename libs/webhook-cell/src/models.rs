use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BOOKING_WIDGET_SOURCE: &str = "booking_widget";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEvent {
    AppointmentCreated,
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookEvent::AppointmentCreated => write!(f, "appointment_created"),
        }
    }
}

/// Outbound body: `{event, timestamp, data}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope<T> {
    pub event: WebhookEvent,
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

impl<T> WebhookEnvelope<T> {
    pub fn new(event: WebhookEvent, data: T) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookMeta {
    pub source: String,
    pub environment: String,
}

impl WebhookMeta {
    pub fn booking_widget(environment: &str) -> Self {
        Self {
            source: BOOKING_WIDGET_SOURCE.to_string(),
            environment: environment.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// No destination configured.
    Skipped,
}

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Webhook payload could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook failed with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
