//! The five step booking flow as a state machine.
//!
//! ```text
//! SelectDoctor -> SelectDateTime -> EnterDetails -> Review -> Success
//! ```
//!
//! Every forward move is an explicit method that checks the data for the
//! current step. `back` moves one step earlier. Fields already collected
//! survive going back and are only replaced when re-entered.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use shared_utils::validation::{
    describe, validate_email, validate_patient_name, validate_phone_format,
    validate_phone_length, FieldError,
};

use crate::services::calendar::{is_bookable_date, is_offered_time};
use crate::services::client::{AppointmentSubmission, BookingSubmitter, SubmissionReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectDoctor,
    SelectDateTime,
    EnterDetails,
    Review,
    Success,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::SelectDoctor,
        WizardStep::SelectDateTime,
        WizardStep::EnterDetails,
        WizardStep::Review,
        WizardStep::Success,
    ];

    pub fn index(self) -> usize {
        match self {
            WizardStep::SelectDoctor => 0,
            WizardStep::SelectDateTime => 1,
            WizardStep::EnterDetails => 2,
            WizardStep::Review => 3,
            WizardStep::Success => 4,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            WizardStep::SelectDoctor => "doctor",
            WizardStep::SelectDateTime => "datetime",
            WizardStep::EnterDetails => "details",
            WizardStep::Review => "confirm",
            WizardStep::Success => "success",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::SelectDoctor => "Choose Doctor",
            WizardStep::SelectDateTime => "Select Time",
            WizardStep::EnterDetails => "Your Details",
            WizardStep::Review => "Confirm",
            WizardStep::Success => "Success",
        }
    }

    /// Success is terminal, so it has no previous step either.
    pub fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectDoctor | WizardStep::Success => None,
            WizardStep::SelectDateTime => Some(WizardStep::SelectDoctor),
            WizardStep::EnterDetails => Some(WizardStep::SelectDateTime),
            WizardStep::Review => Some(WizardStep::EnterDetails),
        }
    }

    pub fn progress_percent(self) -> u8 {
        match self {
            WizardStep::SelectDoctor => 20,
            WizardStep::SelectDateTime => 40,
            WizardStep::EnterDetails => 60,
            WizardStep::Review => 80,
            WizardStep::Success => 100,
        }
    }
}

/// Everything collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub doctor_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub patient_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl BookingDraft {
    fn to_submission(&self) -> Option<AppointmentSubmission> {
        Some(AppointmentSubmission {
            doctor_id: self.doctor_id.clone()?,
            patient_name: self.patient_name.clone()?,
            phone: self.phone.clone()?,
            email: self.email.clone()?,
            date: self.date?.format("%Y-%m-%d").to_string(),
            time: self.time.clone()?,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Cannot {action} while on the {} step", .from.id())]
    InvalidTransition { from: WizardStep, action: &'static str },

    #[error("Nothing before the {} step", .0.id())]
    NoPreviousStep(WizardStep),

    #[error("Please choose a doctor")]
    MissingDoctor,

    #[error("{0} is not available for booking")]
    DateNotBookable(NaiveDate),

    #[error("{0} is not an offered time slot")]
    TimeNotOffered(String),

    #[error("{}", describe(.0))]
    InvalidDetails(Vec<FieldError>),

    #[error("Booking is missing required details")]
    Incomplete,

    #[error("{0}")]
    SubmissionFailed(String),
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    today: NaiveDate,
    error: Option<String>,
    receipt: Option<SubmissionReceipt>,
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::starting_on(Utc::now().date_naive())
    }

    /// Wizard whose bookable window starts on `today`.
    pub fn starting_on(today: NaiveDate) -> Self {
        Self {
            step: WizardStep::SelectDoctor,
            draft: BookingDraft::default(),
            today,
            error: None,
            receipt: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Inline error from the last failed submission, shown on the Review step.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    pub fn select_doctor(&mut self, doctor_id: &str) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::SelectDoctor, "choose a doctor")?;

        let doctor_id = doctor_id.trim();
        if doctor_id.is_empty() {
            return Err(WizardError::MissingDoctor);
        }

        self.draft.doctor_id = Some(doctor_id.to_string());
        Ok(self.advance(WizardStep::SelectDateTime))
    }

    pub fn select_date_time(&mut self, date: NaiveDate, time: &str) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::SelectDateTime, "pick a date and time")?;

        if !is_bookable_date(self.today, date) {
            return Err(WizardError::DateNotBookable(date));
        }
        let time = time.trim();
        if !is_offered_time(time) {
            return Err(WizardError::TimeNotOffered(time.to_string()));
        }

        self.draft.date = Some(date);
        self.draft.time = Some(time.to_string());
        Ok(self.advance(WizardStep::EnterDetails))
    }

    pub fn enter_details(&mut self, name: &str, phone: &str, email: &str) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::EnterDetails, "enter patient details")?;

        let (name, phone, email) = (name.trim(), phone.trim(), email.trim());

        let mut errors: Vec<FieldError> = Vec::new();
        errors.extend(validate_patient_name(name));
        errors.extend(validate_phone_length(phone).or_else(|| validate_phone_format(phone)));
        errors.extend(validate_email(email));
        if !errors.is_empty() {
            return Err(WizardError::InvalidDetails(errors));
        }

        self.draft.patient_name = Some(name.to_string());
        self.draft.phone = Some(phone.to_string());
        self.draft.email = Some(email.to_string());
        Ok(self.advance(WizardStep::Review))
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let previous = self.step.previous().ok_or(WizardError::NoPreviousStep(self.step))?;
        self.error = None;
        Ok(self.advance(previous))
    }

    /// Submit the reviewed booking. On failure the wizard stays on Review and
    /// keeps the message for inline display.
    pub async fn confirm(&mut self, submitter: &dyn BookingSubmitter) -> Result<WizardStep, WizardError> {
        self.expect_step(WizardStep::Review, "confirm the booking")?;

        let submission = self.draft.to_submission().ok_or(WizardError::Incomplete)?;

        match submitter.submit(&submission).await {
            Ok(receipt) => {
                self.error = None;
                self.receipt = Some(receipt);
                Ok(self.advance(WizardStep::Success))
            }
            Err(e) => {
                warn!("Booking failed: {}", e);
                let message = e.to_string();
                self.error = Some(message.clone());
                Err(WizardError::SubmissionFailed(message))
            }
        }
    }

    /// Close the widget. Whatever was entered is discarded.
    pub fn close(&mut self) {
        debug!("Closing booking wizard from {} step", self.step.id());
        *self = Self::starting_on(self.today);
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step != expected {
            return Err(WizardError::InvalidTransition { from: self.step, action });
        }
        Ok(())
    }

    fn advance(&mut self, next: WizardStep) -> WizardStep {
        debug!("Wizard {} -> {}", self.step.id(), next.id());
        self.step = next;
        next
    }
}
