use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::database::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Malformed identifier: {0}")]
    MalformedId(#[from] bson::oid::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// Callers get one flat failure shape; the cause only goes to the logs.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Server error" })),
        )
            .into_response()
    }
}
