use std::sync::Arc;

use time::OffsetDateTime;

use crate::{
    quota::{
        error::QuotaError,
        ports::QuotaStore,
        types::{QuotaPhase, QuotaRecord, ReservationOutcome},
    },
    types::UserId,
};

#[derive(Clone)]
pub struct QuotaManager {
    store: Arc<dyn QuotaStore>,
}

impl QuotaManager {
    pub fn new(store: Arc<dyn QuotaStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn QuotaStore> {
        Arc::clone(&self.store)
    }

    // Fails closed: access the system cannot confirm was counted is never
    // granted.
    pub async fn check_and_reserve(&self, user: &UserId) -> ReservationOutcome {
        match self.store.reserve(user).await {
            Ok(reservation) => {
                let remaining = reservation.limit.saturating_sub(reservation.used);
                if !reservation.allowed {
                    tracing::info!(
                        target: "quota",
                        user = %user,
                        used = reservation.used,
                        limit = reservation.limit,
                        "reservation_denied"
                    );
                }
                ReservationOutcome {
                    allowed: reservation.allowed,
                    remaining,
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "quota",
                    user = %user,
                    kind = ?err.kind,
                    error = %err,
                    "reservation_failed_closed"
                );
                ReservationOutcome {
                    allowed: false,
                    remaining: 0,
                }
            }
        }
    }

    pub async fn release(&self, user: &UserId) -> Result<(), QuotaError> {
        self.store.release(user).await
    }

    pub async fn reset_if_due(
        &self,
        user: &UserId,
        now: OffsetDateTime,
    ) -> Result<bool, QuotaError> {
        let mut record = self.store.quota(user).await?;
        if !record.roll_forward(now) {
            return Ok(false);
        }
        self.store.commit(user, record.clone()).await?;
        tracing::info!(
            target: "quota",
            user = %user,
            next_reset = %record.reset_at,
            "allowance_reset"
        );
        Ok(true)
    }

    // `used` and `reset_at` stay untouched; an exhausted record becomes
    // active again without losing its anchor.
    pub async fn upgrade(&self, user: &UserId, new_limit: u32) -> Result<(), QuotaError> {
        let mut record = self.store.quota(user).await?;
        record.limit = new_limit.max(1);
        self.store.commit(user, record).await
    }

    pub async fn snapshot(&self, user: &UserId) -> Result<QuotaRecord, QuotaError> {
        self.store.quota(user).await
    }

    pub async fn phase(&self, user: &UserId, now: OffsetDateTime) -> Result<QuotaPhase, QuotaError> {
        Ok(self.store.quota(user).await?.phase(now))
    }
}
