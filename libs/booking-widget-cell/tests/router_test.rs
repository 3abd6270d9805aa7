use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use booking_widget_cell::router::widget_routes;
use shared_utils::test_utils::TestConfig;

fn create_test_app() -> Router {
    widget_routes(TestConfig::default().to_arc())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_widget_config_defaults() {
    let (status, config) = get(create_test_app(), "/config").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["buttonStyle"], "default");
    assert_eq!(config["buttonText"], "Book Appointment");
    assert_eq!(config["primaryColor"], "#8B5C9E");
    assert_eq!(config["primaryColorDark"], "#77488a");
    assert_eq!(config["iframeSrc"], "http://localhost:3000/widget");
}

#[tokio::test]
async fn test_widget_config_overrides() {
    let (status, config) = get(
        create_test_app(),
        "/config?buttonStyle=minimal&primaryColor=%23336699&domain=https%3A%2F%2Fclinic.example",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(config["buttonStyle"], "minimal");
    assert_eq!(config["primaryColorDark"], "#1f5285");
    assert_eq!(config["iframeSrc"], "https://clinic.example/widget");
}

#[tokio::test]
async fn test_widget_config_rejects_bad_colour() {
    let (status, body) = get(create_test_app(), "/config?primaryColor=purple").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("purple"));
}

#[tokio::test]
async fn test_widget_config_malformed_query_is_json_error() {
    let (status, body) = get(create_test_app(), "/config?buttonText=Book&buttonText=Again").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_calendar_lists_window_and_slots() {
    let (status, calendar) = get(create_test_app(), "/calendar").await;

    assert_eq!(status, StatusCode::OK);
    let days = calendar["days"].as_array().unwrap();
    assert_eq!(days.len(), 14);

    // Tolerate the request straddling midnight UTC
    let first = days[0]["date"].as_str().unwrap();
    let today = Utc::now().date_naive();
    let yesterday = today.pred_opt().unwrap();
    assert!(first == today.to_string() || first == yesterday.to_string());

    let slots = calendar["timeSlots"].as_array().unwrap();
    assert_eq!(slots.len(), 12);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[0]["label"], "9:00 AM");
}
