//! In-process [`DocumentStore`] used for `memory://` and the test suite.
use std::collections::HashMap;

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};
use tokio::sync::RwLock;

use crate::{
    database::{DocumentStore, StoreError},
    models::ID,
};

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches(document, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        document.insert(ID, id);

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;

        let Some(document) = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| matches(d, &filter)))
        else {
            return Ok(None);
        };

        for (key, value) in patch {
            document.insert(key, value);
        }

        Ok(Some(document.clone()))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;

        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };

        match documents.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
