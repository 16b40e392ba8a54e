use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::sync::{
    error::{SyncError, storage_error},
    ports::CacheStore,
};

// Ordered map so `keys` returns a stable order.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<BTreeMap<String, Value>>,
    unavailable: AtomicBool,
}

impl InMemoryCacheStore {
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), SyncError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(storage_error("local cache is unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, SyncError> {
        self.ensure_available()?;
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), SyncError> {
        self.ensure_available()?;
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SyncError> {
        self.ensure_available()?;
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SyncError> {
        self.ensure_available()?;
        Ok(self
            .entries
            .lock()
            .await
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
