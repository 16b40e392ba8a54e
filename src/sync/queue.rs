use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    sync::{
        error::{SyncError, invalid_entry},
        ports::CacheStore,
    },
    types::{TaskId, UserId},
};

const PENDING_PREFIX: &str = "pending/breakdown/";

// Queuing never consults the cached allowance; the real atomic check runs
// when the queue drains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingBreakdown {
    pub id: String,
    pub user: UserId,
    pub task_id: TaskId,
    #[serde(with = "time::serde::rfc3339")]
    pub queued_at: OffsetDateTime,
}

pub struct PendingRequestQueue {
    cache: Arc<dyn CacheStore>,
}

impl PendingRequestQueue {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    pub async fn enqueue(
        &self,
        user: &UserId,
        task_id: &TaskId,
        now: OffsetDateTime,
    ) -> Result<PendingBreakdown, SyncError> {
        let pending = PendingBreakdown {
            id: Uuid::now_v7().to_string(),
            user: user.clone(),
            task_id: task_id.clone(),
            queued_at: now,
        };
        let value = serde_json::to_value(&pending)
            .map_err(|err| invalid_entry(format!("failed to encode pending request: {err}")))?;
        self.cache
            .set(&format!("{PENDING_PREFIX}{}", pending.id), value)
            .await?;
        tracing::debug!(
            target: "sync",
            user = %pending.user,
            task_id = %pending.task_id,
            "breakdown_request_parked"
        );
        Ok(pending)
    }

    // Oldest first. Entries that no longer decode are dropped rather than
    // wedging the queue.
    pub async fn pending(&self) -> Result<Vec<PendingBreakdown>, SyncError> {
        let mut out = Vec::new();
        for key in self.cache.keys(PENDING_PREFIX).await? {
            let Some(value) = self.cache.get(&key).await? else {
                continue;
            };
            match serde_json::from_value::<PendingBreakdown>(value) {
                Ok(pending) => out.push(pending),
                Err(err) => {
                    tracing::warn!(
                        target: "sync",
                        key = %key,
                        error = %err,
                        "dropping_undecodable_pending_request"
                    );
                    self.cache.remove(&key).await?;
                }
            }
        }
        out.sort_by(|a, b| a.queued_at.cmp(&b.queued_at).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    pub async fn remove(&self, id: &str) -> Result<(), SyncError> {
        self.cache.remove(&format!("{PENDING_PREFIX}{id}")).await
    }
}
