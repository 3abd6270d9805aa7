// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use doctor_cell::models::Doctor;
use shared_utils::validation::{describe, FieldError};
use webhook_cell::models::WebhookMeta;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booked slot. Serialized camelCase for API clients; store rows use snake_case columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    #[serde(alias = "doctor_id")]
    pub doctor_id: String,
    #[serde(alias = "patient_name")]
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    pub date: DateTime<Utc>,
    /// `HH:MM`, clinic local time.
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Appointment joined with its doctor, the shape every endpoint returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentWithDoctor {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub doctor: Doctor,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Raw booking submission. Every field is optional on the wire so that a
/// missing value is reported as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAppointmentRequest {
    pub doctor_id: Option<String>,
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub date: Option<String>,
    pub time: Option<String>,
}

/// A submission that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub doctor_id: String,
    pub patient_name: String,
    pub phone: String,
    pub email: String,
    pub date: DateTime<Utc>,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub message: String,
    pub appointment: AppointmentWithDoctor,
}

impl BookingConfirmation {
    pub fn new(appointment: AppointmentWithDoctor) -> Self {
        Self {
            message: "Appointment booked successfully".to_string(),
            appointment,
        }
    }
}

/// `data` section of the `appointment_created` webhook.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentCreatedData {
    pub appointment: AppointmentWithDoctor,
    pub meta: WebhookMeta,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Invalid appointment request: {}", describe(.0))]
    Validation(Vec<FieldError>),

    #[error("Doctor not found: {0}")]
    DoctorNotFound(String),

    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Appointment store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl AppointmentError {
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppointmentError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
