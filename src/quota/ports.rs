use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    quota::{error::QuotaError, types::QuotaRecord},
    types::UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReservation {
    pub allowed: bool,
    // Post-operation value; unchanged when denied.
    pub used: u32,
    pub limit: u32,
}

// `reserve` must be one indivisible conditional increment at the storage
// boundary (stored procedure / transactional RPC): increment `used` only if
// the pre-increment value is below `limit`, and report whether it happened.
// Read-compare-write is not an implementation; two devices can both pass
// the comparison before either write lands.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    async fn quota(&self, user: &UserId) -> Result<QuotaRecord, QuotaError>;

    async fn reserve(&self, user: &UserId) -> Result<StoreReservation, QuotaError>;

    async fn release(&self, user: &UserId) -> Result<(), QuotaError>;

    async fn commit(&self, user: &UserId, record: QuotaRecord) -> Result<(), QuotaError>;

    async fn reset_expired(&self, now: OffsetDateTime) -> Result<u32, QuotaError>;
}
