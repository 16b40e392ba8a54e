use std::{fmt, sync::Arc};

use time::OffsetDateTime;

use crate::{
    adaptation::{self, AdaptationRecord},
    breakdown::{
        BreakdownError, BreakdownOrchestrator, BreakdownOutcome, CompletionPort, TelemetrySink,
        error::internal_error as breakdown_internal,
    },
    checkin::CognitiveState,
    config::CoreConfig,
    quota::{QuotaManager, QuotaStore},
    store::{CheckinStore, StoreError, TaskStore},
    sync::{
        CacheEntry, CacheStore, OfflineSyncReconciler, PendingBreakdown, PendingRequestQueue,
        ReconcileOutput, SyncError,
    },
    tasks::{self, Task},
    types::{TaskId, UserId, ValidationError},
};

// The four public entry points (adapt, filter, breakdown, reconcile)
// wired over the injected collaborators. No hidden current state anywhere
// below this type; callers pass explicit values.
pub struct CoreEngine {
    checkins: Arc<dyn CheckinStore>,
    tasks: Arc<dyn TaskStore>,
    quota: QuotaManager,
    orchestrator: BreakdownOrchestrator,
    reconciler: OfflineSyncReconciler,
    parked: PendingRequestQueue,
}

impl CoreEngine {
    pub fn new(
        checkins: Arc<dyn CheckinStore>,
        tasks: Arc<dyn TaskStore>,
        quota_store: Arc<dyn QuotaStore>,
        completion: Arc<dyn CompletionPort>,
        cache: Arc<dyn CacheStore>,
        config: CoreConfig,
    ) -> Self {
        let quota = QuotaManager::new(quota_store);
        let orchestrator =
            BreakdownOrchestrator::new(quota.clone(), completion, config.breakdown.clone());
        let reconciler = OfflineSyncReconciler::new(Arc::clone(&checkins), Arc::clone(&tasks));
        let parked = PendingRequestQueue::new(cache);
        Self {
            checkins,
            tasks,
            quota,
            orchestrator,
            reconciler,
            parked,
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.orchestrator = self.orchestrator.with_telemetry(telemetry);
        self
    }

    pub fn quota(&self) -> &QuotaManager {
        &self.quota
    }

    pub fn adapt(&self, state: Option<&CognitiveState>) -> AdaptationRecord {
        adaptation::adapt(state)
    }

    pub async fn submit_checkin(
        &self,
        user: &UserId,
        state: CognitiveState,
    ) -> Result<AdaptationRecord, CheckinSubmitError> {
        state.validate()?;
        self.checkins.save_state(user, state.clone()).await?;
        Ok(adaptation::adapt(Some(&state)))
    }

    pub async fn current_adaptation(&self, user: &UserId) -> Result<AdaptationRecord, StoreError> {
        let state = self.checkins.current_state(user).await?;
        Ok(adaptation::adapt(state.as_ref()))
    }

    pub async fn visible_tasks(
        &self,
        user: &UserId,
        include_completed: bool,
    ) -> Result<Vec<Task>, StoreError> {
        let adaptation = self.current_adaptation(user).await?;
        let all_tasks = self.tasks.tasks(user).await?;
        Ok(tasks::visible_tasks(
            &all_tasks,
            adaptation.complexity_ceiling,
            include_completed,
        ))
    }

    pub async fn request_breakdown(
        &self,
        user: &UserId,
        task_id: &TaskId,
    ) -> Result<BreakdownOutcome, BreakdownError> {
        let task = self
            .tasks
            .task(user, task_id)
            .await
            .map_err(|err| breakdown_internal(err.to_string()))?
            .ok_or_else(|| breakdown_internal(format!("unknown task '{task_id}'")))?;

        let state = self
            .checkins
            .current_state(user)
            .await
            .map_err(|err| breakdown_internal(err.to_string()))?;

        let outcome = self
            .orchestrator
            .request_breakdown(user, &task, state.as_ref())
            .await?;

        if let BreakdownOutcome::Ready { breakdown } = &outcome {
            let mut updated = task;
            updated.breakdown = Some(breakdown.clone());
            self.tasks
                .save_task(user, updated)
                .await
                .map_err(|err| breakdown_internal(err.to_string()))?;
        }

        Ok(outcome)
    }

    // Never looks at any cached allowance figure; the real check runs on
    // drain.
    pub async fn park_breakdown(
        &self,
        user: &UserId,
        task_id: &TaskId,
        now: OffsetDateTime,
    ) -> Result<PendingBreakdown, SyncError> {
        self.parked.enqueue(user, task_id, now).await
    }

    pub async fn reconcile(
        &self,
        user: &UserId,
        local: Vec<CacheEntry>,
        now: OffsetDateTime,
    ) -> Result<ReconcileOutput, SyncError> {
        let tone = self
            .current_adaptation(user)
            .await
            .map(|adaptation| adaptation.tone)
            .unwrap_or(adaptation::Tone::Standard);
        self.reconciler.reconcile(user, local, tone, now).await
    }

    // Entries that reached a decision are removed; requests that still
    // cannot reach the store stay parked for the next reconnect.
    pub async fn drain_parked(
        &self,
        user: &UserId,
    ) -> Result<Vec<(TaskId, BreakdownOutcome)>, SyncError> {
        let pending_requests = self.parked.pending().await?;
        if pending_requests.is_empty() {
            return Ok(Vec::new());
        }

        // A fail-closed denial while the store is still unreachable must
        // not consume the parked entry; drain only once the real atomic
        // check can run.
        if let Err(err) = self.quota.snapshot(user).await {
            tracing::info!(
                target: "sync",
                user = %user,
                error = %err,
                "drain_deferred_store_unreachable"
            );
            return Ok(Vec::new());
        }

        let mut outcomes = Vec::new();
        for pending in pending_requests {
            if &pending.user != user {
                continue;
            }
            match self.request_breakdown(user, &pending.task_id).await {
                Ok(outcome) => {
                    self.parked.remove(&pending.id).await?;
                    outcomes.push((pending.task_id, outcome));
                }
                Err(err) => {
                    tracing::warn!(
                        target: "sync",
                        user = %user,
                        task_id = %pending.task_id,
                        error = %err,
                        "parked_request_still_blocked"
                    );
                }
            }
        }
        Ok(outcomes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinSubmitError {
    Validation(ValidationError),
    Store(StoreError),
}

impl fmt::Display for CheckinSubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CheckinSubmitError {}

impl From<ValidationError> for CheckinSubmitError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for CheckinSubmitError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
