//! # MongoDB
//!
//! Document database holding the `restaurants`, `menus` and `analytics` collections.
//!
//! ## Requirements
//!
//! - Exact-match filters on one or more fields (`_id`, or `restaurantId` for menus)
//! - Store-generated identifiers, opaque to callers
//! - No transactions, no multi-document atomicity
//!
//! ## Implementation
//!
//! - Handlers only see [`DocumentStore`], so the service runs against MongoDB in production
//!   and against [`MemoryStore`](crate::memory::MemoryStore) locally and in tests
//! - Updates are applied with `$set`, last write wins
//! - One client per process, opened at startup and shut down after the server drains
use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::{Client, Database, options::ReturnDocument};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Store returned a non-ObjectId identifier: {0}")]
    UnexpectedId(Bson),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn insert_one(&self, collection: &str, document: Document)
    -> Result<ObjectId, StoreError>;

    /// Sets every field of `patch` on the first match and returns it as it is after the update.
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    async fn close(&self) {}
}

pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(database_name);

        // The driver connects lazily, so make sure the server answers before serving requests.
        database.run_command(doc! { "ping": 1 }).await?;

        info!("Connected to MongoDB database {database_name}");

        Ok(Self { client, database })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(filter)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<ObjectId, StoreError> {
        let result = self
            .database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id),
            other => Err(StoreError::UnexpectedId(other)),
        }
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let updated = self
            .database
            .collection::<Document>(collection)
            .find_one_and_update(filter, doc! { "$set": patch })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self
            .database
            .collection::<Document>(collection)
            .delete_one(filter)
            .await?;

        Ok(result.deleted_count)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;

        info!("MongoDB client shut down");
    }
}
