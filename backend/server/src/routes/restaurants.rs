use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use bson::{Bson, doc, oid::ObjectId};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    analytics::{AnalyticsEvent, RESTAURANT_CREATED},
    error::AppError,
    models::{CREATED_AT, ID, RESTAURANT_ID, RESTAURANTS, RestaurantPayload, UPDATED_AT},
    state::AppState,
    wire::{from_wire, now, to_wire, to_wire_all},
};

pub async fn list_restaurants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Value>>, AppError> {
    let restaurants = state.store.find(RESTAURANTS, doc! {}).await?;

    Ok(Json(to_wire_all(restaurants)))
}

pub async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload: RestaurantPayload = from_wire(&body)?;

    let mut restaurant = payload.into_fields()?;
    let name = restaurant.get("name").cloned().unwrap_or(Bson::Null);
    let created_at = now();
    restaurant.insert(CREATED_AT, created_at);
    restaurant.insert(UPDATED_AT, created_at);

    let id = state
        .store
        .insert_one(RESTAURANTS, restaurant.clone())
        .await?;
    restaurant.insert(ID, id);

    // A failed analytics write fails the whole request, even though the restaurant is stored.
    state
        .analytics
        .record(
            AnalyticsEvent::new(RESTAURANT_CREATED)
                .field(RESTAURANT_ID, id.to_hex())
                .field("restaurantName", name),
        )
        .await?;

    info!("Created restaurant {id}");

    Ok((StatusCode::CREATED, Json(to_wire(restaurant))))
}

pub async fn update_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Option<Value>>, AppError> {
    let id = ObjectId::parse_str(&id)?;
    let payload: RestaurantPayload = from_wire(&body)?;

    let mut patch = payload.into_fields()?;
    patch.insert(UPDATED_AT, now());

    let updated = state
        .store
        .find_one_and_update(RESTAURANTS, doc! { "_id": id }, patch)
        .await?;

    if updated.is_none() {
        info!("Update matched no restaurant {id}");
    }

    Ok(Json(updated.map(to_wire)))
}

pub async fn delete_restaurant(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = ObjectId::parse_str(&id)?;

    let deleted = state
        .store
        .delete_one(RESTAURANTS, doc! { "_id": id })
        .await?;

    info!("Deleted {deleted} restaurant(s) for {id}");

    Ok(Json(json!({ "message": "Restaurant deleted" })))
}
