use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn widget_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/config", get(handlers::get_widget_config))
        .route("/calendar", get(handlers::get_calendar))
        .with_state(state)
}
