use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    checkin::{self, CognitiveState},
    store::{
        error::{StoreError, unavailable},
        ports::{CheckinStore, TaskStore},
    },
    tasks::Task,
    types::{TaskId, UserId},
};

// Keeps the full check-in history so "current" is always the latest by
// capture time.
#[derive(Default)]
pub struct InMemoryStore {
    checkins: Mutex<HashMap<UserId, Vec<CognitiveState>>>,
    tasks: Mutex<HashMap<UserId, Vec<Task>>>,
    unreachable: AtomicBool,
}

impl InMemoryStore {
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    fn ensure_reachable(&self) -> Result<(), StoreError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(unavailable("persistence engine is unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl CheckinStore for InMemoryStore {
    async fn current_state(&self, user: &UserId) -> Result<Option<CognitiveState>, StoreError> {
        self.ensure_reachable()?;
        let guard = self.checkins.lock().await;
        Ok(guard
            .get(user)
            .and_then(|history| checkin::latest(history))
            .cloned())
    }

    async fn save_state(&self, user: &UserId, state: CognitiveState) -> Result<(), StoreError> {
        self.ensure_reachable()?;
        let mut guard = self.checkins.lock().await;
        guard.entry(user.clone()).or_default().push(state);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for InMemoryStore {
    async fn tasks(&self, user: &UserId) -> Result<Vec<Task>, StoreError> {
        self.ensure_reachable()?;
        let guard = self.tasks.lock().await;
        Ok(guard.get(user).cloned().unwrap_or_default())
    }

    async fn task(&self, user: &UserId, task_id: &TaskId) -> Result<Option<Task>, StoreError> {
        self.ensure_reachable()?;
        let guard = self.tasks.lock().await;
        Ok(guard
            .get(user)
            .and_then(|tasks| tasks.iter().find(|task| &task.id == task_id))
            .cloned())
    }

    async fn save_task(&self, user: &UserId, task: Task) -> Result<(), StoreError> {
        self.ensure_reachable()?;
        let mut guard = self.tasks.lock().await;
        let tasks = guard.entry(user.clone()).or_default();
        match tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => tasks.push(task),
        }
        Ok(())
    }
}
