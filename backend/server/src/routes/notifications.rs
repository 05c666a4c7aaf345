use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    analytics::{AnalyticsEvent, RESTAURANT_CREATED_NOTIFICATION},
    error::AppError,
    models::{NotificationPayload, RESTAURANT_ID},
    state::AppState,
    wire::{from_wire, pass_through},
};

/// Logs a creation reported by another service. Nothing else happens.
pub async fn restaurant_created_notification(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let payload: NotificationPayload = from_wire(&body)?;

    let id = state
        .analytics
        .record(
            AnalyticsEvent::new(RESTAURANT_CREATED_NOTIFICATION)
                .field(RESTAURANT_ID, pass_through(RESTAURANT_ID, payload.restaurant_id)?)
                .field("restaurantName", pass_through("name", payload.name)?)
                .source(state.config.notification_source.clone()),
        )
        .await?;

    info!("Recorded creation notification {id}");

    Ok(Json(json!({ "message": "Notification received" })))
}
