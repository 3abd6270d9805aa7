use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Doctor, DoctorError};
use crate::services::seed::seed_catalog;

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// All bookable doctors, ordered by id. No pagination: the directory is small.
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        debug!("Listing doctors");

        let doctors: Vec<Doctor> = self.supabase.request(
            Method::GET,
            "/rest/v1/doctors?select=*&order=id.asc",
            None,
        ).await?;

        debug!("Found {} doctors", doctors.len());
        Ok(doctors)
    }

    /// Get doctor by ID
    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        let path = format!(
            "/rest/v1/doctors?select=*&id=eq.{}",
            urlencoding::encode(doctor_id)
        );
        let mut result: Vec<Doctor> = self.supabase.request(
            Method::GET,
            &path,
            None,
        ).await?;

        if result.is_empty() {
            return Err(DoctorError::NotFound(doctor_id.to_string()));
        }

        Ok(result.swap_remove(0))
    }

    /// Upsert the seed catalog. Existing rows with the same id are overwritten.
    pub async fn seed_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        let catalog = seed_catalog();
        if let Some(doctor) = catalog.iter().find(|d| d.fee == 0) {
            return Err(DoctorError::InvalidRecord(format!("{} has no fee", doctor.id)));
        }

        info!("Seeding {} doctors", catalog.len());

        let seeded: Vec<Doctor> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/doctors?on_conflict=id",
            Some(json!(catalog)),
            Some(SupabaseClient::upsert_representation()),
        ).await?;

        info!("Doctor directory seeded ({} rows)", seeded.len());
        Ok(seeded)
    }
}
