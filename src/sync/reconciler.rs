use std::sync::Arc;

use time::OffsetDateTime;

use crate::{
    adaptation::Tone,
    copy::{CopyKey, user_copy},
    store::{CheckinStore, TaskStore, error::StoreError},
    sync::{
        error::{SyncError, storage_error},
        types::{AppliedEntity, CacheEntry, CachedEntity, Conflict, ReconcileOutput},
    },
    tasks::Task,
    types::UserId,
};

// Check-ins are last-write-wins by capture time, stale local entries
// discarded silently. Task edits merge against the cached base; remote wins
// whole-record when both sides moved, with the local edit retained in the
// conflict. Quota snapshots are never written anywhere.
pub struct OfflineSyncReconciler {
    checkins: Arc<dyn CheckinStore>,
    tasks: Arc<dyn TaskStore>,
}

impl OfflineSyncReconciler {
    pub fn new(checkins: Arc<dyn CheckinStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self { checkins, tasks }
    }

    pub async fn reconcile(
        &self,
        user: &UserId,
        local: Vec<CacheEntry>,
        tone: Tone,
        now: OffsetDateTime,
    ) -> Result<ReconcileOutput, SyncError> {
        let mut output = ReconcileOutput::default();

        for entry in local {
            match entry.entity {
                CachedEntity::Checkin { state } => {
                    let server = self
                        .checkins
                        .current_state(user)
                        .await
                        .map_err(as_sync_error)?;
                    let is_newer = server
                        .as_ref()
                        .is_none_or(|current| state.captured_at > current.captured_at);
                    if is_newer {
                        self.checkins
                            .save_state(user, state.clone())
                            .await
                            .map_err(as_sync_error)?;
                        output.applied.push(AppliedEntity::Checkin { state });
                    } else {
                        output.discarded += 1;
                    }
                }
                CachedEntity::TaskEdit { base, edited } => {
                    self.reconcile_task_edit(user, base, edited, tone, now, &mut output)
                        .await?;
                }
                CachedEntity::QuotaHint { .. } => {
                    output.discarded += 1;
                }
            }
        }

        tracing::info!(
            target: "sync",
            user = %user,
            applied = output.applied.len(),
            conflicts = output.conflicts.len(),
            discarded = output.discarded,
            "reconcile_completed"
        );
        Ok(output)
    }

    async fn reconcile_task_edit(
        &self,
        user: &UserId,
        base: Option<Task>,
        edited: Task,
        tone: Tone,
        now: OffsetDateTime,
        output: &mut ReconcileOutput,
    ) -> Result<(), SyncError> {
        let remote = self
            .tasks
            .task(user, &edited.id)
            .await
            .map_err(as_sync_error)?;

        let local_changed = base.as_ref() != Some(&edited);
        let remote_changed = match (&base, &remote) {
            (Some(base), Some(remote)) => base != remote,
            // No base: anything on the server is a concurrent creation.
            (None, Some(_)) => true,
            // Deleted remotely counts as a remote change.
            (Some(_), None) => true,
            (None, None) => false,
        };

        if !local_changed {
            output.discarded += 1;
            return Ok(());
        }

        if remote_changed {
            output.conflicts.push(Conflict {
                task_id: edited.id.clone(),
                local: edited,
                remote,
                noted_at: now,
                message: user_copy(CopyKey::EditKeptForReview, tone).to_string(),
            });
            return Ok(());
        }

        self.tasks
            .save_task(user, edited.clone())
            .await
            .map_err(as_sync_error)?;
        output.applied.push(AppliedEntity::Task { task: edited });
        Ok(())
    }
}

fn as_sync_error(err: StoreError) -> SyncError {
    storage_error(err.to_string())
}
