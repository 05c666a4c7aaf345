use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

pub mod menus;
pub mod notifications;
pub mod restaurants;

pub use menus::{create_menu, delete_menu, list_menus, update_menu};
pub use notifications::restaurant_created_notification;
pub use restaurants::{create_restaurant, delete_restaurant, list_restaurants, update_restaurant};

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "Restaurant service running",
        "port": state.config.port,
    }))
}
