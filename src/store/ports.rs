use async_trait::async_trait;

use crate::{
    checkin::CognitiveState,
    store::error::StoreError,
    tasks::Task,
    types::{TaskId, UserId},
};

// Row-level isolation is the implementation's responsibility: a user id
// never reads another user's rows.
#[async_trait]
pub trait CheckinStore: Send + Sync {
    async fn current_state(&self, user: &UserId) -> Result<Option<CognitiveState>, StoreError>;

    async fn save_state(&self, user: &UserId, state: CognitiveState) -> Result<(), StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn tasks(&self, user: &UserId) -> Result<Vec<Task>, StoreError>;

    async fn task(&self, user: &UserId, task_id: &TaskId) -> Result<Option<Task>, StoreError>;

    async fn save_task(&self, user: &UserId, task: Task) -> Result<(), StoreError>;
}
