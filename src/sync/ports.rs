use async_trait::async_trait;
use serde_json::Value;

use crate::sync::error::SyncError;

// No transactional guarantees; nothing correctness-critical may treat this
// as source of truth.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, SyncError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), SyncError>;

    async fn remove(&self, key: &str) -> Result<(), SyncError>;

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, SyncError>;
}
