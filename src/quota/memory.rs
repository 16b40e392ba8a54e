use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
    quota::{
        error::{QuotaError, record_missing, store_unavailable},
        ports::{QuotaStore, StoreReservation},
        types::QuotaRecord,
    },
    types::UserId,
};

// The conditional increment runs under one lock acquisition, the in-process
// equivalent of the server-side transactional update.
#[derive(Default)]
pub struct InMemoryQuotaStore {
    records: Mutex<HashMap<UserId, QuotaRecord>>,
    unreachable: AtomicBool,
}

impl InMemoryQuotaStore {
    pub async fn seed(&self, user: impl Into<UserId>, record: QuotaRecord) {
        self.records.lock().await.insert(user.into(), record);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn ensure_reachable(&self) -> Result<(), QuotaError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(store_unavailable("allowance store is unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn quota(&self, user: &UserId) -> Result<QuotaRecord, QuotaError> {
        self.ensure_reachable()?;
        self.records
            .lock()
            .await
            .get(user)
            .cloned()
            .ok_or_else(|| record_missing(format!("no allowance record for '{user}'")))
    }

    async fn reserve(&self, user: &UserId) -> Result<StoreReservation, QuotaError> {
        self.ensure_reachable()?;
        let mut guard = self.records.lock().await;
        let record = guard
            .get_mut(user)
            .ok_or_else(|| record_missing(format!("no allowance record for '{user}'")))?;

        if record.used < record.limit {
            record.used += 1;
            Ok(StoreReservation {
                allowed: true,
                used: record.used,
                limit: record.limit,
            })
        } else {
            Ok(StoreReservation {
                allowed: false,
                used: record.used,
                limit: record.limit,
            })
        }
    }

    async fn release(&self, user: &UserId) -> Result<(), QuotaError> {
        self.ensure_reachable()?;
        let mut guard = self.records.lock().await;
        let record = guard
            .get_mut(user)
            .ok_or_else(|| record_missing(format!("no allowance record for '{user}'")))?;
        record.used = record.used.saturating_sub(1);
        Ok(())
    }

    async fn commit(&self, user: &UserId, record: QuotaRecord) -> Result<(), QuotaError> {
        self.ensure_reachable()?;
        self.records.lock().await.insert(user.clone(), record);
        Ok(())
    }

    async fn reset_expired(&self, now: OffsetDateTime) -> Result<u32, QuotaError> {
        self.ensure_reachable()?;
        let mut guard = self.records.lock().await;
        let mut reset_count = 0;
        for record in guard.values_mut() {
            if record.roll_forward(now) {
                reset_count += 1;
            }
        }
        Ok(reset_count)
    }
}
