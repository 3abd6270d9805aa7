use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use shared_utils::validation::{
    validate_email, validate_patient_name, validate_phone_length, FieldError,
};

use crate::models::{AppointmentError, CreateAppointmentRequest, ValidatedBooking};

/// Check every field of a submission and report all failures at once.
pub fn validate_booking_request(
    request: &CreateAppointmentRequest,
) -> Result<ValidatedBooking, AppointmentError> {
    let mut errors = Vec::new();

    let doctor_id = field(&request.doctor_id);
    let patient_name = field(&request.patient_name);
    let phone = field(&request.phone);
    let email = field(&request.email);

    if doctor_id.is_empty() {
        errors.push(FieldError::new("doctorId", "Doctor is required"));
    }
    errors.extend(validate_patient_name(patient_name));
    errors.extend(validate_phone_length(phone));
    errors.extend(validate_email(email));

    let date = parse_appointment_date(field(&request.date));
    if date.is_none() {
        errors.push(FieldError::new("date", "Date must be an ISO date or timestamp"));
    }

    let time = parse_appointment_time(field(&request.time));
    if time.is_none() {
        errors.push(FieldError::new("time", "Time must be in HH:MM format"));
    }

    match (date, time) {
        (Some(date), Some(time)) if errors.is_empty() => Ok(ValidatedBooking {
            doctor_id: doctor_id.to_string(),
            patient_name: patient_name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            date,
            time: time.format("%H:%M").to_string(),
        }),
        _ => Err(AppointmentError::Validation(errors)),
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or_default()
}

/// Accepts a full RFC 3339 timestamp (what browsers send) or a bare date,
/// which is taken as midnight UTC.
pub fn parse_appointment_date(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

pub fn parse_appointment_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}
