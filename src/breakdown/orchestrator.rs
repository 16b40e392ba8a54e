use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use uuid::Uuid;

use crate::{
    adaptation::{self, AdaptationRecord},
    breakdown::{
        error::{BreakdownError, invalid_request, timeout as timeout_error},
        fallback::fallback_breakdown,
        parse::parse_breakdown,
        ports::{CompletionPort, CompletionRequest},
        prompt::{breakdown_system_prompt, build_breakdown_prompt},
        telemetry::{BreakdownTelemetryEvent, NoopTelemetrySink, TelemetrySink},
        types::{BreakdownConfig, BreakdownDenial, BreakdownOutcome},
    },
    checkin::CognitiveState,
    copy::{CopyKey, user_copy},
    quota::{PlanTier, QuotaManager},
    tasks::{Breakdown, Task},
    types::{RequestId, UserId},
};

// Reservation -> state-adapted prompt -> bounded assistant call; any
// assistant failure releases the reservation and serves a local plan. The
// feature degrades, the monthly allowance never corrupts.
pub struct BreakdownOrchestrator {
    quota: QuotaManager,
    completion: Arc<dyn CompletionPort>,
    telemetry: Arc<dyn TelemetrySink>,
    config: BreakdownConfig,
}

impl BreakdownOrchestrator {
    pub fn new(
        quota: QuotaManager,
        completion: Arc<dyn CompletionPort>,
        config: BreakdownConfig,
    ) -> Self {
        Self {
            quota,
            completion,
            telemetry: Arc::new(NoopTelemetrySink),
            config,
        }
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub async fn request_breakdown(
        &self,
        user: &UserId,
        task: &Task,
        state: Option<&CognitiveState>,
    ) -> Result<BreakdownOutcome, BreakdownError> {
        task.validate()
            .map_err(|err| invalid_request(err.to_string()))?;

        let request_id: RequestId = Uuid::now_v7().to_string();
        let adaptation = adaptation::adapt(state);
        self.telemetry.on_event(BreakdownTelemetryEvent::RequestStarted {
            request_id: request_id.clone(),
        });

        let reservation = self.quota.check_and_reserve(user).await;
        if !reservation.allowed {
            // Tier is display-only here; unreadable record presents as free.
            let tier = self
                .quota
                .snapshot(user)
                .await
                .map(|record| record.tier)
                .unwrap_or(PlanTier::Free);
            tracing::info!(
                target: "breakdown",
                request_id = %request_id,
                user = %user,
                remaining = reservation.remaining,
                "request_declined"
            );
            self.telemetry
                .on_event(BreakdownTelemetryEvent::ReservationDenied {
                    request_id,
                    tier,
                    remaining: reservation.remaining,
                });
            return Ok(BreakdownOutcome::Declined {
                denial: BreakdownDenial {
                    tier,
                    remaining: reservation.remaining,
                    message: user_copy(CopyKey::BreakdownDeclined, adaptation.tone).to_string(),
                },
            });
        }

        // The guard undoes the reservation if this future is dropped before
        // the outcome is decided.
        let guard = ReservationGuard::new(self.quota.clone(), user.clone(), request_id.clone());

        let prompt = format!(
            "{}\n\n{}",
            breakdown_system_prompt(),
            build_breakdown_prompt(task, &adaptation)
        );
        let call_timeout = Duration::from_millis(self.config.completion_timeout_ms.max(1));
        let started_at = Instant::now();

        let assistant_result = self.call_assistant(prompt, call_timeout).await;
        let elapsed_ms = started_at.elapsed().as_millis() as u64;

        match assistant_result {
            Ok(breakdown) => {
                // Served requests stay counted.
                guard.disarm();
                tracing::debug!(
                    target: "breakdown",
                    request_id = %request_id,
                    steps = breakdown.steps.len(),
                    total_minutes = breakdown.total_minutes,
                    elapsed_ms = elapsed_ms,
                    "assistant_breakdown_ready"
                );
                self.telemetry
                    .on_event(BreakdownTelemetryEvent::AssistantCompleted {
                        request_id,
                        steps: breakdown.steps.len(),
                        elapsed_ms,
                    });
                Ok(BreakdownOutcome::Ready { breakdown })
            }
            Err(err) if err.is_assistant_failure() => {
                tracing::warn!(
                    target: "breakdown",
                    request_id = %request_id,
                    kind = ?err.kind,
                    elapsed_ms = elapsed_ms,
                    error = %err,
                    "assistant_failed_falling_back"
                );
                self.telemetry
                    .on_event(BreakdownTelemetryEvent::AssistantFailed {
                        request_id: request_id.clone(),
                        kind: err.kind,
                        elapsed_ms,
                    });

                guard.release_now().await;
                self.telemetry
                    .on_event(BreakdownTelemetryEvent::ReservationReleased {
                        request_id: request_id.clone(),
                    });

                let breakdown = fallback_breakdown(task, &adaptation, &self.config);
                self.telemetry
                    .on_event(BreakdownTelemetryEvent::FallbackGenerated {
                        request_id,
                        steps: breakdown.steps.len(),
                    });
                Ok(BreakdownOutcome::Ready { breakdown })
            }
            Err(err) => {
                guard.release_now().await;
                Err(err)
            }
        }
    }

    pub fn attach(task: &mut Task, breakdown: Breakdown) {
        task.breakdown = Some(breakdown);
    }

    pub fn adaptation_for(state: Option<&CognitiveState>) -> AdaptationRecord {
        adaptation::adapt(state)
    }

    async fn call_assistant(
        &self,
        prompt: String,
        call_timeout: Duration,
    ) -> Result<Breakdown, BreakdownError> {
        let request = CompletionRequest {
            prompt,
            max_tokens: self.config.max_completion_tokens,
            timeout: call_timeout,
        };

        let reply = tokio::time::timeout(call_timeout, self.completion.generate(request))
            .await
            .map_err(|_| {
                timeout_error(format!(
                    "assistant call exceeded {} ms",
                    call_timeout.as_millis()
                ))
            })??;

        parse_breakdown(&reply)
    }
}

// `disarm` keeps the reservation, `release_now` undoes it inline, and
// dropping while still armed (a cancelled request) spawns the undo so a
// charged-but-unused reservation never leaks.
struct ReservationGuard {
    quota: QuotaManager,
    user: UserId,
    request_id: RequestId,
    armed: bool,
}

impl ReservationGuard {
    fn new(quota: QuotaManager, user: UserId, request_id: RequestId) -> Self {
        Self {
            quota,
            user,
            request_id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }

    async fn release_now(mut self) {
        self.armed = false;
        if let Err(err) = self.quota.release(&self.user).await {
            tracing::warn!(
                target: "breakdown",
                request_id = %self.request_id,
                user = %self.user,
                error = %err,
                "reservation_release_failed"
            );
        }
    }
}

impl Drop for ReservationGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let quota = self.quota.clone();
        let user = self.user.clone();
        let request_id = self.request_id.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(err) = quota.release(&user).await {
                        tracing::warn!(
                            target: "breakdown",
                            request_id = %request_id,
                            user = %user,
                            error = %err,
                            "cancelled_reservation_release_failed"
                        );
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    target: "breakdown",
                    request_id = %request_id,
                    user = %user,
                    "cancelled_reservation_could_not_be_released"
                );
            }
        }
    }
}
