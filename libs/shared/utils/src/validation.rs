// =====================================================================================
// FIELD VALIDATION - PATIENT CONTACT DETAILS
// =====================================================================================

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PHONE_LENGTH: usize = 10;
pub const MAX_PHONE_LENGTH: usize = 15;
pub const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

static PHONE_CHARS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9+\-\s()]*$").expect("phone pattern is a valid regex")
});

/// A single rejected field, reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Joins field errors into one human readable line.
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH
        && !email.contains("..")
        && EMAIL_REGEX.is_match(email)
}

/// Lengths are counted in characters, not bytes.
pub fn validate_patient_name(name: &str) -> Option<FieldError> {
    if name.chars().count() < MIN_NAME_LENGTH {
        return Some(FieldError::new("patientName", "Name must be at least 2 characters"));
    }
    None
}

pub fn validate_phone_length(phone: &str) -> Option<FieldError> {
    let length = phone.chars().count();
    if length < MIN_PHONE_LENGTH {
        Some(FieldError::new("phone", "Phone number must be at least 10 digits"))
    } else if length > MAX_PHONE_LENGTH {
        Some(FieldError::new("phone", "Phone number must not exceed 15 digits"))
    } else {
        None
    }
}

/// Digits plus `+ - ( )` and whitespace. The widget form enforces this on top of the length rule.
pub fn validate_phone_format(phone: &str) -> Option<FieldError> {
    if !PHONE_CHARS_REGEX.is_match(phone) {
        return Some(FieldError::new("phone", "Invalid phone number format"));
    }
    None
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if !is_valid_email(email) {
        return Some(FieldError::new("email", "Invalid email address"));
    }
    None
}
