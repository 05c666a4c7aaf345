//! Restaurant and menu service for the food delivery platform.
//!
//! # General Infrastructure
//! - Browser frontend and the Node.js restaurant service call this server directly
//! - MongoDB holds `restaurants`, `menus` and the write-only `analytics` log
//! - The connection string comes from `MONGODB_URI` or `/run/secrets/MONGODB_URI`
//! - `MONGODB_URI=memory://` runs against an in-process store
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /health | 200 |
//! | GET | /api/restaurants | 200 |
//! | POST | /api/restaurants | 201 |
//! | PUT | /api/restaurants/{id} | 200 |
//! | DELETE | /api/restaurants/{id} | 200 |
//! | GET | /api/menus/{restaurantId} | 200 |
//! | POST | /api/menus | 201 |
//! | PUT | /api/menus/{id} | 200 |
//! | DELETE | /api/menus/{id} | 200 |
//! | POST | /api/restaurant-created | 200 |
//!
//! Every failure answers 500 with `{"message": "Server error"}`.
//!
//! Updates of an unknown identifier answer 200 with a `null` body and deletes always
//! acknowledge, whether or not a document was removed.
//!
//!
//!
//! # Setup
//!
//! Run locally without a database.
//! ```sh
//! MONGODB_URI=memory:// RUST_LOG=info cargo run -p restaurant-service
//! ```
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::Method,
    routing::{get, post, put},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod analytics;
pub mod config;
pub mod database;
pub mod error;
pub mod memory;
pub mod models;
pub mod routes;
pub mod state;
pub mod wire;

use config::Config;
use routes::{
    create_menu, create_restaurant, delete_menu, delete_restaurant, health_handler, list_menus,
    list_restaurants, restaurant_created_notification, update_menu, update_restaurant,
};
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/restaurants",
            get(list_restaurants).post(create_restaurant),
        )
        .route(
            "/api/restaurants/{id}",
            put(update_restaurant).delete(delete_restaurant),
        )
        .route("/api/menus", post(create_menu))
        .route(
            "/api/menus/{id}",
            get(list_menus).put(update_menu).delete(delete_menu),
        )
        .route(
            "/api/restaurant-created",
            post(restaurant_created_notification),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config).await?;

    info!("Starting server...");

    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    state.store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
