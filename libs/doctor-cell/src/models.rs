use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bookable practitioner. Reference data: seeded once, read-only at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    /// Consultation fee in whole rupees.
    pub fee: u32,
    pub speciality: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Doctor {
    pub fn new(id: &str, name: &str, fee: u32, speciality: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            fee,
            speciality: speciality.to_string(),
            experience: None,
            rating: None,
            location: None,
            availability: None,
            qualifications: Vec::new(),
            image: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Invalid doctor record: {0}")]
    InvalidRecord(String),

    #[error("Doctor store unavailable: {0}")]
    Store(#[from] anyhow::Error),
}
