//! # Wire Format
//!
//! Conversion between stored documents and the JSON bodies exchanged with clients.
//!
//! ## Outbound
//! - `_id` (**ObjectId**) becomes its 24 character hex string
//! - `createdAt`/`updatedAt` (**DateTime**) become ISO-8601 text, millisecond precision, UTC
//! - Everything else passes through as relaxed extended JSON
//!
//! ## Inbound
//! - Only the recognized fields of the target resource are kept, unknown fields are dropped
//! - `rating`/`price` accept a number or numeric text and are stored as doubles
//! - Other recognized fields are stored as sent, whatever their JSON type
use axum::body::Bytes;
use bson::{Bson, DateTime, Document};
use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    error::AppError,
    models::{CREATED_AT, ID, Numeral, UPDATED_AT},
};

pub fn from_wire<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    Ok(serde_json::from_slice(body)?)
}

pub fn to_wire(document: Document) -> Value {
    let fields: Map<String, Value> = document
        .into_iter()
        .map(|(key, value)| {
            let value = match (key.as_str(), value) {
                (ID, Bson::ObjectId(id)) => Value::String(id.to_hex()),
                (CREATED_AT | UPDATED_AT, Bson::DateTime(timestamp)) => {
                    Value::String(iso_8601(timestamp))
                }
                (_, other) => other.into_relaxed_extjson(),
            };

            (key, value)
        })
        .collect();

    Value::Object(fields)
}

pub fn to_wire_all(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(to_wire).collect()
}

pub fn coerce_float(field: &'static str, value: Option<&Numeral>) -> Result<f64, AppError> {
    let invalid = |reason: String| AppError::Validation { field, reason };

    let number = match value {
        None => return Err(invalid("missing".to_string())),
        Some(Numeral::Number(number)) => *number,
        Some(Numeral::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(format!("{text:?} is not a number ({e})")))?,
    };

    // JSON has no representation for NaN or infinities.
    if !number.is_finite() {
        return Err(invalid(format!("{number} is not finite")));
    }

    Ok(number)
}

pub fn pass_through(field: &'static str, value: Option<Value>) -> Result<Bson, AppError> {
    match value {
        None => Ok(Bson::Null),
        Some(value) => bson::to_bson(&value).map_err(|e| AppError::Validation {
            field,
            reason: e.to_string(),
        }),
    }
}

pub fn now() -> DateTime {
    DateTime::from_chrono(Utc::now())
}

fn iso_8601(timestamp: DateTime) -> String {
    timestamp
        .to_chrono()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
