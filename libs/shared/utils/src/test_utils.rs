use std::sync::Arc;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub webhook_url: Option<String>,
    pub widget_domain: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            webhook_url: None,
            widget_domain: "http://localhost:3000".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_supabase(supabase_url: &str) -> Self {
        Self {
            supabase_url: supabase_url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_webhook(mut self, webhook_url: &str) -> Self {
        self.webhook_url = Some(webhook_url.to_string());
        self
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            webhook_url: self.webhook_url.clone(),
            environment: "test".to_string(),
            widget_domain: self.widget_domain.clone(),
            api_base_url: "http://localhost:3000".to_string(),
            port: 3000,
            seed_doctors: false,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned PostgREST rows, shaped like the `doctors` and `appointments` tables.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_response(id: &str, name: &str, fee: i64, speciality: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "fee": fee,
            "speciality": speciality,
            "experience": null,
            "rating": null,
            "location": null,
            "availability": null,
            "qualifications": [],
            "image": null
        })
    }

    pub fn dr_sameer() -> serde_json::Value {
        json!({
            "id": "dr-sameer",
            "name": "Dr. Sameer",
            "fee": 700,
            "speciality": "Orthopedic Surgeon",
            "experience": "15+ years",
            "rating": 4.9,
            "location": "HSR Layout, Bangalore",
            "availability": "Available Today",
            "qualifications": ["MBBS", "MS Ortho", "Fellowship in Sports Medicine"],
            "image": "/doctors/dr-sameer.jpg"
        })
    }

    pub fn other_doctors() -> serde_json::Value {
        json!({
            "id": "other-doctors",
            "name": "Other Doctors",
            "fee": 1000,
            "speciality": "Sports Orthopedic Doctors",
            "experience": "10+ years",
            "rating": 4.7,
            "location": "HSR Layout, Bangalore",
            "availability": "Available Today",
            "qualifications": ["MBBS", "MS Ortho"],
            "image": "/doctors/default-doctor.jpg"
        })
    }

    pub fn appointment_row(doctor_id: &str, patient_name: &str, date: &str, time: &str) -> serde_json::Value {
        let now = Utc::now().to_rfc3339();
        json!({
            "id": Uuid::new_v4(),
            "doctor_id": doctor_id,
            "patient_name": patient_name,
            "phone": "9876543210",
            "email": "patient@example.com",
            "date": format!("{}T00:00:00Z", date),
            "time": time,
            "status": "confirmed",
            "created_at": now,
            "updated_at": now
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
