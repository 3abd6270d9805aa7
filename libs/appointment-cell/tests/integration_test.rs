mod common;

use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{method, path};

use appointment_cell::router::appointment_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::TestConfig;

use common::{valid_booking, wait_for_requests, FakeAppointmentStore};

fn create_test_app(config: AppConfig) -> Router {
    appointment_routes(Arc::new(config))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn setup() -> (MockServer, FakeAppointmentStore, AppConfig) {
    let mock_server = MockServer::start().await;
    let store = FakeAppointmentStore::new();
    store.mount(&mock_server).await;
    let config = TestConfig::with_supabase(&mock_server.uri()).to_app_config();
    (mock_server, store, config)
}

#[tokio::test]
async fn test_book_dr_sameer_scenario() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let response = app.oneshot(post_json("/", &valid_booking())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Appointment booked successfully");

    let appointment = &body["appointment"];
    assert_eq!(appointment["status"], "confirmed");
    assert_eq!(appointment["doctorId"], "dr-sameer");
    assert_eq!(appointment["patientName"], "Jane Doe");
    assert_eq!(appointment["time"], "10:00");
    assert!(appointment["date"].as_str().unwrap().starts_with("2025-06-01T00:00:00"));
    assert_eq!(appointment["doctor"]["fee"], 700);
    assert_eq!(appointment["doctor"]["name"], "Dr. Sameer");

    assert_eq!(store.count(), 1);
    let row = &store.rows()[0];
    assert_eq!(row["doctor_id"], "dr-sameer");
    assert_eq!(row["status"], "confirmed");
}

#[tokio::test]
async fn test_each_valid_submission_persists_exactly_one_row() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let submissions = [
        valid_booking(),
        json!({
            "doctorId": "other-doctors",
            "patientName": "Ravi Kumar",
            "phone": "+91 98450 12345",
            "email": "ravi.kumar@example.in",
            "date": "2025-06-02T04:30:00.000Z",
            "time": "16:30"
        }),
    ];

    for (index, submission) in submissions.iter().enumerate() {
        let response = app.clone().oneshot(post_json("/", submission)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.count(), index + 1);
    }

    let doctor_ids: Vec<Value> = store.rows().iter().map(|r| r["doctor_id"].clone()).collect();
    assert_eq!(doctor_ids, vec![json!("dr-sameer"), json!("other-doctors")]);
}

#[tokio::test]
async fn test_phone_out_of_bounds_is_rejected_without_persisting() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    for phone in ["987654321", "98765432101234567"] {
        let mut booking = valid_booking();
        booking["phone"] = json!(phone);

        let response = app.clone().oneshot(post_json("/", &booking)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("phone"));
    }

    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_wrongly_typed_field_is_a_json_validation_error() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let mut booking = valid_booking();
    booking["phone"] = json!(9876543210u64);

    let response = app.oneshot(post_json("/", &booking)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("phone"));
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_booking_without_json_content_type_is_rejected() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(valid_booking().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_cancel_with_malformed_id_is_bad_request() {
    let (_server, _store, config) = setup().await;
    let app = create_test_app(config);

    let response = app.oneshot(post_json("/not-a-uuid/cancel", &json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_email_is_rejected_without_persisting() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    for email in ["jane", "jane@", "@example.com", "jane@example"] {
        let mut booking = valid_booking();
        booking["email"] = json!(email);

        let response = app.clone().oneshot(post_json("/", &booking)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_missing_email_leaves_count_unchanged() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let response = app.clone().oneshot(post_json("/", &valid_booking())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.count(), 1);

    let mut booking = valid_booking();
    booking.as_object_mut().unwrap().remove("email");

    let response = app.clone().oneshot(post_json("/", &booking)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.count(), 1);

    let listed = read_json(app.oneshot(get("/")).await.unwrap()).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_doctor_is_not_found_and_not_persisted() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let mut booking = valid_booking();
    booking["doctorId"] = json!("dr-who");

    let response = app.oneshot(post_json("/", &booking)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_created_appointment_round_trips_through_list() {
    let (_server, _store, config) = setup().await;
    let app = create_test_app(config);

    let created = read_json(app.clone().oneshot(post_json("/", &valid_booking())).await.unwrap()).await;
    let created = &created["appointment"];

    let listed = read_json(app.oneshot(get("/")).await.unwrap()).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);

    let found = &listed[0];
    for field in ["id", "doctorId", "patientName", "phone", "email", "time", "status", "createdAt"] {
        assert_eq!(found[field], created[field], "field {} differs", field);
    }
    assert_eq!(found["doctor"]["fee"], 700);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (_server, store, config) = setup().await;

    let mut older = shared_utils::test_utils::MockSupabaseResponses::appointment_row(
        "dr-sameer", "Older Patient", "2025-06-01", "09:00",
    );
    older["created_at"] = json!("2025-05-01T10:00:00+00:00");
    let mut newer = shared_utils::test_utils::MockSupabaseResponses::appointment_row(
        "other-doctors", "Newer Patient", "2025-06-03", "11:00",
    );
    newer["created_at"] = json!("2025-05-02T10:00:00+00:00");
    store.insert(older);
    store.insert(newer);

    let app = create_test_app(config);
    let listed = read_json(app.oneshot(get("/")).await.unwrap()).await;
    let listed = listed.as_array().unwrap();

    assert_eq!(listed[0]["patientName"], "Newer Patient");
    assert_eq!(listed[0]["doctor"]["fee"], 1000);
    assert_eq!(listed[1]["patientName"], "Older Patient");
}

#[tokio::test]
async fn test_unreachable_webhook_does_not_fail_booking() {
    let (_server, store, config) = setup().await;
    let config = AppConfig {
        webhook_url: Some("http://127.0.0.1:1/unreachable".to_string()),
        ..config
    };
    let app = create_test_app(config);

    let response = app.oneshot(post_json("/", &valid_booking())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn test_rejecting_webhook_does_not_fail_booking() {
    let (_server, store, config) = setup().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&webhook_server)
        .await;

    let config = AppConfig {
        webhook_url: Some(webhook_server.uri()),
        ..config
    };
    let app = create_test_app(config);

    let response = app.oneshot(post_json("/", &valid_booking())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn test_webhook_receives_appointment_created_envelope() {
    let (_server, _store, config) = setup().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/hooks/appointments"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook_server)
        .await;

    let config = AppConfig {
        webhook_url: Some(format!("{}/hooks/appointments", webhook_server.uri())),
        environment: "staging".to_string(),
        ..config
    };
    let app = create_test_app(config);

    let created = read_json(app.oneshot(post_json("/", &valid_booking())).await.unwrap()).await;

    let received = wait_for_requests(&webhook_server, 1).await;
    assert_eq!(received.len(), 1);

    let envelope: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(envelope["event"], "appointment_created");
    assert!(envelope["timestamp"].is_string());
    assert_eq!(envelope["data"]["appointment"]["id"], created["appointment"]["id"]);
    assert_eq!(envelope["data"]["appointment"]["doctor"]["fee"], 700);
    assert_eq!(envelope["data"]["meta"]["source"], "booking_widget");
    assert_eq!(envelope["data"]["meta"]["environment"], "staging");
}

#[tokio::test]
async fn test_cancel_appointment_flow() {
    let (_server, store, config) = setup().await;
    let app = create_test_app(config);

    let created = read_json(app.clone().oneshot(post_json("/", &valid_booking())).await.unwrap()).await;
    let id = created["appointment"]["id"].as_str().unwrap().to_string();

    let uri = format!("/{}/cancel", id);
    let response = app.clone().oneshot(post_json(&uri, &json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cancelled = read_json(response).await;
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["doctor"]["id"], "dr-sameer");
    assert_eq!(store.rows()[0]["status"], "cancelled");

    // Second cancel is a no-op
    let response = app.oneshot(post_json(&uri, &json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.count(), 1);
}

#[tokio::test]
async fn test_cancel_unknown_appointment() {
    let (_server, _store, config) = setup().await;
    let app = create_test_app(config);

    let uri = format!("/{}/cancel", uuid::Uuid::new_v4());
    let response = app.oneshot(post_json(&uri, &json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_returns_generic_error() {
    let mock_server = MockServer::start().await;
    common::mount_doctors(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_supabase(&mock_server.uri()).to_app_config();
    let app = create_test_app(config);

    let response = app.oneshot(post_json("/", &valid_booking())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Failed to create appointment");
}
