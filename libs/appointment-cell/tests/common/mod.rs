// Stateful stand-in for the Supabase REST API, enough for the booking flow.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{MockServer, Mock, Request, Respond, ResponseTemplate};
use wiremock::matchers::{method, path, query_param};

use shared_utils::test_utils::MockSupabaseResponses;

#[derive(Clone, Default)]
pub struct FakeAppointmentStore {
    rows: Arc<Mutex<Vec<Value>>>,
}

impl FakeAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }

    pub fn insert(&self, row: Value) {
        self.rows.lock().unwrap().push(row);
    }

    /// Mount doctor lookups for the seed catalog plus the appointments table.
    pub async fn mount(&self, server: &MockServer) {
        mount_doctors(server).await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/appointments"))
            .respond_with(InsertResponder(self.clone()))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .respond_with(SelectResponder(self.clone()))
            .mount(server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/rest/v1/appointments"))
            .respond_with(UpdateResponder(self.clone()))
            .mount(server)
            .await;
    }
}

pub async fn mount_doctors(server: &MockServer) {
    for doctor in [MockSupabaseResponses::dr_sameer(), MockSupabaseResponses::other_doctors()] {
        let id = doctor["id"].as_str().unwrap().to_string();
        Mock::given(method("GET"))
            .and(path("/rest/v1/doctors"))
            .and(query_param("id", format!("eq.{}", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([doctor])))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .with_priority(10)
        .mount(server)
        .await;
}

fn doctor_for(id: &str) -> Value {
    match id {
        "dr-sameer" => MockSupabaseResponses::dr_sameer(),
        "other-doctors" => MockSupabaseResponses::other_doctors(),
        _ => Value::Null,
    }
}

fn id_filter(request: &Request) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == "id")
        .and_then(|(_, value)| value.strip_prefix("eq.").map(str::to_string))
}

struct InsertResponder(FakeAppointmentStore);

impl Respond for InsertResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let row: Value = match serde_json::from_slice(&request.body) {
            Ok(row) => row,
            Err(_) => return ResponseTemplate::new(400),
        };
        self.0.insert(row.clone());
        ResponseTemplate::new(201).set_body_json(json!([row]))
    }
}

struct SelectResponder(FakeAppointmentStore);

impl Respond for SelectResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let wanted = id_filter(request);
        let rows: Vec<Value> = self
            .0
            .rows()
            .into_iter()
            .filter(|row| wanted.as_deref().map_or(true, |id| row["id"] == id))
            .map(|mut row| {
                let doctor = doctor_for(row["doctor_id"].as_str().unwrap_or_default());
                row["doctor"] = doctor;
                row
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(rows)
    }
}

struct UpdateResponder(FakeAppointmentStore);

impl Respond for UpdateResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Some(id) = id_filter(request) else {
            return ResponseTemplate::new(400);
        };
        let patch: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        let mut rows = self.0.rows.lock().unwrap();
        let updated: Vec<Value> = rows
            .iter_mut()
            .filter(|row| row["id"] == id.as_str())
            .map(|row| {
                if let Some(fields) = patch.as_object() {
                    for (key, value) in fields {
                        row[key] = value.clone();
                    }
                }
                row.clone()
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(updated)
    }
}

pub fn valid_booking() -> Value {
    json!({
        "doctorId": "dr-sameer",
        "patientName": "Jane Doe",
        "phone": "9876543210",
        "email": "jane@example.com",
        "date": "2025-06-01",
        "time": "10:00"
    })
}

/// Poll until the server has seen `expected` requests or give up after ~3s.
pub async fn wait_for_requests(server: &MockServer, expected: usize) -> Vec<Request> {
    for _ in 0..60 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= expected {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    server.received_requests().await.unwrap_or_default()
}
