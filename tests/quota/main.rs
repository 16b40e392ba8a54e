mod manager;
mod reset;

use std::sync::Arc;

use time::macros::datetime;
use tidemark_core::quota::{InMemoryQuotaStore, PlanTier, QuotaManager, QuotaRecord};

pub fn record(tier: PlanTier, limit: u32) -> QuotaRecord {
    QuotaRecord::new(tier, limit, datetime!(2026-04-01 00:00 UTC)).expect("limit is positive")
}

pub async fn manager_with(user: &str, quota: QuotaRecord) -> (QuotaManager, Arc<InMemoryQuotaStore>) {
    let store = Arc::new(InMemoryQuotaStore::default());
    store.seed(user, quota).await;
    let manager = QuotaManager::new(store.clone());
    (manager, store)
}
