use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use shared_config::AppConfig;

/// Body the widget posts to `POST /appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSubmission {
    pub doctor_id: String,
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedDoctor {
    pub id: String,
    pub name: String,
    pub fee: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedAppointment {
    pub id: String,
    pub status: String,
    pub time: String,
    pub doctor: BookedDoctor,
}

/// What the success screen needs from the API's answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub appointment: BookedAppointment,
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Could not reach the booking service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response from the booking service: {0}")]
    InvalidResponse(String),
}

/// Transport the wizard uses to hand a finished booking to the API.
#[async_trait]
pub trait BookingSubmitter: Send + Sync {
    async fn submit(&self, submission: &AppointmentSubmission) -> Result<SubmissionReceipt, SubmissionError>;
}

pub struct HttpBookingClient {
    client: Client,
    api_base_url: String,
}

impl HttpBookingClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl BookingSubmitter for HttpBookingClient {
    async fn submit(&self, submission: &AppointmentSubmission) -> Result<SubmissionReceipt, SubmissionError> {
        let url = format!("{}/appointments", self.api_base_url);
        debug!("Submitting booking for doctor {} to {}", submission.doctor_id, url);

        let response = self.client
            .post(&url)
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| "Failed to create appointment".to_string());

            error!("Booking rejected ({}): {}", status, message);
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let receipt: SubmissionReceipt = serde_json::from_str(&body)
            .map_err(|e| SubmissionError::InvalidResponse(e.to_string()))?;

        info!("Booking {} accepted", receipt.appointment.id);
        Ok(receipt)
    }
}
