use crate::store::error::StoreError;
use crate::store::ProfileStore;
use crate::types::destination::DestinationId;
use crate::types::profile::StoredClimate;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

/// Process-local store, mainly for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    destinations: Mutex<HashSet<DestinationId>>,
    records: Mutex<HashMap<DestinationId, StoredClimate>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_destinations(destinations: impl IntoIterator<Item = DestinationId>) -> Self {
        Self {
            destinations: Mutex::new(destinations.into_iter().collect()),
            records: Mutex::new(HashMap::new()),
        }
    }

    pub async fn register(&self, destination: DestinationId) {
        self.destinations.lock().await.insert(destination);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn resolve(&self, destination: &DestinationId) -> Result<bool, StoreError> {
        Ok(self.destinations.lock().await.contains(destination))
    }

    async fn upsert(&self, record: &StoredClimate) -> Result<(), StoreError> {
        self.records
            .lock()
            .await
            .insert(record.destination.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, destination: &DestinationId) -> Result<Option<StoredClimate>, StoreError> {
        Ok(self.records.lock().await.get(destination).cloned())
    }
}
