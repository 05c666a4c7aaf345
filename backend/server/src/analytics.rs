//! # Analytics
//!
//! Append-only event log in the `analytics` collection.
//!
//! Nothing in this service reads it back. Each record carries an `event` tag, the subject
//! fields of that event, a `timestamp` and, for events reported by other services, a `source`.
use std::sync::Arc;

use bson::{Bson, DateTime, Document, oid::ObjectId};
use tracing::debug;

use crate::{
    database::{DocumentStore, StoreError},
    models::ANALYTICS,
    wire::now,
};

pub const RESTAURANT_CREATED: &str = "restaurant_created";
pub const RESTAURANT_CREATED_NOTIFICATION: &str = "restaurant_created_notification";

#[derive(Debug, Clone)]
pub struct AnalyticsEvent {
    pub event: &'static str,
    pub fields: Document,
    pub timestamp: DateTime,
    pub source: Option<String>,
}

impl AnalyticsEvent {
    pub fn new(event: &'static str) -> Self {
        Self {
            event,
            fields: Document::new(),
            timestamp: now(),
            source: None,
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Bson>) -> Self {
        self.fields.insert(key, value);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn into_document(self) -> Document {
        let mut document = Document::new();

        document.insert("event", self.event);
        for (key, value) in self.fields {
            document.insert(key, value);
        }
        document.insert("timestamp", self.timestamp);

        if let Some(source) = self.source {
            document.insert("source", source);
        }

        document
    }
}

#[derive(Clone)]
pub struct Analytics {
    store: Arc<dyn DocumentStore>,
}

impl Analytics {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, event: AnalyticsEvent) -> Result<ObjectId, StoreError> {
        let name = event.event;
        let id = self.store.insert_one(ANALYTICS, event.into_document()).await?;

        debug!("Recorded {name} event {id}");

        Ok(id)
    }
}
