use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{checkin::CognitiveState, quota::QuotaRecord, tasks::Task, types::TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Pending,
    Synced,
    Conflict,
}

// Task edits carry the last known-synced version alongside the edit so the
// reconciler can tell which side moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CachedEntity {
    Checkin {
        state: CognitiveState,
    },
    TaskEdit {
        #[serde(default)]
        base: Option<Task>,
        edited: Task,
    },
    // Read-only display hint; the server counter is the only authority.
    QuotaHint {
        record: QuotaRecord,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: String,
    pub entity: CachedEntity,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    pub sync_state: SyncState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedEntity {
    Checkin { state: CognitiveState },
    Task { task: Task },
}

// The losing local edit is retained here for user review, never silently
// discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub task_id: TaskId,
    pub local: Task,
    #[serde(default)]
    pub remote: Option<Task>,
    #[serde(with = "time::serde::rfc3339")]
    pub noted_at: OffsetDateTime,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutput {
    pub applied: Vec<AppliedEntity>,
    pub conflicts: Vec<Conflict>,
    pub discarded: usize,
}
