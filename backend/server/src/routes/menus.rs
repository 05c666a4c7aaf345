use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use bson::{doc, oid::ObjectId};
use serde_json::{Value, json};
use tracing::info;

use crate::{
    error::AppError,
    models::{CREATED_AT, ID, MENUS, MenuPayload, UPDATED_AT},
    state::AppState,
    wire::{from_wire, now, to_wire, to_wire_all},
};

/// Menus are matched on the `restaurantId` text exactly as it was stored.
pub async fn list_menus(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<Value>>, AppError> {
    let menus = state
        .store
        .find(MENUS, doc! { "restaurantId": restaurant_id })
        .await?;

    Ok(Json(to_wire_all(menus)))
}

pub async fn create_menu(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let payload: MenuPayload = from_wire(&body)?;

    let mut menu = payload.into_create_fields()?;
    let created_at = now();
    menu.insert(CREATED_AT, created_at);
    menu.insert(UPDATED_AT, created_at);

    let id = state.store.insert_one(MENUS, menu.clone()).await?;
    menu.insert(ID, id);

    info!("Created menu item {id}");

    Ok((StatusCode::CREATED, Json(to_wire(menu))))
}

pub async fn update_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Option<Value>>, AppError> {
    let id = ObjectId::parse_str(&id)?;
    let payload: MenuPayload = from_wire(&body)?;

    let mut patch = payload.into_update_fields()?;
    patch.insert(UPDATED_AT, now());

    let updated = state
        .store
        .find_one_and_update(MENUS, doc! { "_id": id }, patch)
        .await?;

    if updated.is_none() {
        info!("Update matched no menu item {id}");
    }

    Ok(Json(updated.map(to_wire)))
}

pub async fn delete_menu(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = ObjectId::parse_str(&id)?;

    let deleted = state.store.delete_one(MENUS, doc! { "_id": id }).await?;

    info!("Deleted {deleted} menu item(s) for {id}");

    Ok(Json(json!({ "message": "Menu item deleted" })))
}
