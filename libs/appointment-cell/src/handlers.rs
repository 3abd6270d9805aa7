// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentWithDoctor, BookingConfirmation, CreateAppointmentRequest,
};
use crate::services::booking::AppointmentBookingService;

fn to_app_error(err: AppointmentError, failure: &str) -> AppError {
    match err {
        AppointmentError::Validation(_) => AppError::ValidationError(err.to_string()),
        AppointmentError::DoctorNotFound(id) => AppError::NotFound(format!("Doctor {} not found", id)),
        AppointmentError::NotFound(id) => AppError::NotFound(format!("Appointment {} not found", id)),
        AppointmentError::Store(e) => AppError::database(failure, e),
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<AppConfig>>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let Json(request) = payload?;
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.create_appointment(request).await
        .map_err(|e| to_app_error(e, "Failed to create appointment"))?;

    Ok(Json(BookingConfirmation::new(appointment)))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Vec<AppointmentWithDoctor>>, AppError> {
    let booking_service = AppointmentBookingService::new(&state);

    let appointments = booking_service.list_appointments().await
        .map_err(|e| to_app_error(e, "Failed to fetch appointments"))?;

    Ok(Json(appointments))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<AppConfig>>,
    appointment_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<AppointmentWithDoctor>, AppError> {
    let Path(appointment_id) = appointment_id?;
    let booking_service = AppointmentBookingService::new(&state);

    let appointment = booking_service.cancel_appointment(appointment_id).await
        .map_err(|e| to_app_error(e, "Failed to cancel appointment"))?;

    Ok(Json(appointment))
}
