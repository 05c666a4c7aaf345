use std::sync::Arc;

use tracing::info;

use super::{
    analytics::Analytics,
    config::{Config, MEMORY_URI},
    database::{DocumentStore, MongoStore, StoreError},
    memory::MemoryStore,
};

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub analytics: Analytics,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store: Arc<dyn DocumentStore> = if config.database_url == MEMORY_URI {
            info!("Using in-memory document store");
            Arc::new(MemoryStore::new())
        } else {
            Arc::new(MongoStore::connect(&config.database_url, &config.database_name).await?)
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Arc<Self> {
        let analytics = Analytics::new(store.clone());

        Arc::new(Self {
            config,
            store,
            analytics,
        })
    }
}
