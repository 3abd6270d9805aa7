use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{BookingCalendar, WidgetConfig, WidgetConfigQuery, WidgetError};
use crate::services::{booking_calendar, resolve_widget_config};

impl From<WidgetError> for AppError {
    fn from(err: WidgetError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[axum::debug_handler]
pub async fn get_widget_config(
    State(state): State<Arc<AppConfig>>,
    query: Result<Query<WidgetConfigQuery>, QueryRejection>,
) -> Result<Json<WidgetConfig>, AppError> {
    let Query(query) = query?;
    let config = resolve_widget_config(&query, &state.widget_domain)?;

    Ok(Json(config))
}

#[axum::debug_handler]
pub async fn get_calendar(
    State(_state): State<Arc<AppConfig>>,
) -> Result<Json<BookingCalendar>, AppError> {
    let today = Utc::now().date_naive();

    Ok(Json(booking_calendar(today)))
}
