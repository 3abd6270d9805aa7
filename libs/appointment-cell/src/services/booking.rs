// libs/appointment-cell/src/services/booking.rs
use anyhow::anyhow;
use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use doctor_cell::models::{Doctor, DoctorError};
use doctor_cell::services::doctor::DoctorService;
use webhook_cell::models::{WebhookEnvelope, WebhookEvent, WebhookMeta};
use webhook_cell::services::notifier::WebhookNotifier;

use crate::models::{
    Appointment, AppointmentCreatedData, AppointmentError, AppointmentStatus,
    AppointmentWithDoctor, CreateAppointmentRequest,
};
use crate::services::validation::validate_booking_request;

const APPOINTMENTS_WITH_DOCTOR: &str = "select=*,doctor:doctors(*)";

pub struct AppointmentBookingService {
    supabase: SupabaseClient,
    doctor_service: DoctorService,
    notifier: WebhookNotifier,
    environment: String,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            doctor_service: DoctorService::new(config),
            notifier: WebhookNotifier::new(config),
            environment: config.environment.clone(),
        }
    }

    /// Validate, persist and announce a booking.
    ///
    /// Nothing is written unless validation passes and the doctor exists. The
    /// webhook is spawned after the write and never affects the result.
    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<AppointmentWithDoctor, AppointmentError> {
        let booking = validate_booking_request(&request)?;

        info!("Booking appointment with doctor {} on {} at {}",
              booking.doctor_id, booking.date.date_naive(), booking.time);

        let doctor = self.find_doctor(&booking.doctor_id).await?;

        let now = Utc::now().to_rfc3339();
        let appointment_data = json!({
            "id": Uuid::new_v4(),
            "doctor_id": booking.doctor_id,
            "patient_name": booking.patient_name,
            "phone": booking.phone,
            "email": booking.email,
            "date": booking.date.to_rfc3339(),
            "time": booking.time,
            "status": AppointmentStatus::Confirmed,
            "created_at": now,
            "updated_at": now
        });

        let mut result: Vec<Appointment> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/appointments",
            Some(appointment_data),
            Some(SupabaseClient::return_representation()),
        ).await?;

        if result.is_empty() {
            return Err(AppointmentError::Store(anyhow!("Store returned no appointment row")));
        }

        let created = AppointmentWithDoctor {
            appointment: result.swap_remove(0),
            doctor,
        };

        info!("Appointment {} confirmed for doctor {}", created.appointment.id, created.doctor.id);

        self.announce(&created);

        Ok(created)
    }

    /// Every appointment with its doctor, newest first.
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentWithDoctor>, AppointmentError> {
        debug!("Listing appointments");

        let path = format!("/rest/v1/appointments?{}&order=created_at.desc", APPOINTMENTS_WITH_DOCTOR);
        let mut appointments: Vec<AppointmentWithDoctor> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await?;

        appointments.sort_by(|a, b| b.appointment.created_at.cmp(&a.appointment.created_at));

        Ok(appointments)
    }

    pub async fn get_appointment(&self, appointment_id: Uuid) -> Result<AppointmentWithDoctor, AppointmentError> {
        let path = format!("/rest/v1/appointments?{}&id=eq.{}", APPOINTMENTS_WITH_DOCTOR, appointment_id);
        let mut result: Vec<AppointmentWithDoctor> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await?;

        if result.is_empty() {
            return Err(AppointmentError::NotFound(appointment_id));
        }

        Ok(result.swap_remove(0))
    }

    /// Status is the only mutable field. Cancelling twice is a no-op.
    pub async fn cancel_appointment(&self, appointment_id: Uuid) -> Result<AppointmentWithDoctor, AppointmentError> {
        let existing = self.get_appointment(appointment_id).await?;

        if existing.appointment.is_cancelled() {
            debug!("Appointment {} already cancelled", appointment_id);
            return Ok(existing);
        }

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let mut result: Vec<Appointment> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            Some(json!({
                "status": AppointmentStatus::Cancelled,
                "updated_at": Utc::now().to_rfc3339()
            })),
            Some(SupabaseClient::return_representation()),
        ).await?;

        if result.is_empty() {
            return Err(AppointmentError::NotFound(appointment_id));
        }

        info!("Appointment {} cancelled", appointment_id);

        Ok(AppointmentWithDoctor {
            appointment: result.swap_remove(0),
            doctor: existing.doctor,
        })
    }

    async fn find_doctor(&self, doctor_id: &str) -> Result<Doctor, AppointmentError> {
        self.doctor_service.get_doctor(doctor_id).await.map_err(|e| match e {
            DoctorError::NotFound(id) => {
                warn!("Booking rejected, unknown doctor {}", id);
                AppointmentError::DoctorNotFound(id)
            }
            DoctorError::InvalidRecord(msg) => AppointmentError::Store(anyhow!(msg)),
            DoctorError::Store(e) => AppointmentError::Store(e),
        })
    }

    fn announce(&self, created: &AppointmentWithDoctor) {
        let envelope = WebhookEnvelope::new(
            WebhookEvent::AppointmentCreated,
            AppointmentCreatedData {
                appointment: created.clone(),
                meta: WebhookMeta::booking_widget(&self.environment),
            },
        );

        // Detached: the caller's response does not wait for delivery
        self.notifier.notify(&envelope);
    }
}
