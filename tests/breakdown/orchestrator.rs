use std::sync::Arc;

use tidemark_core::{
    breakdown::{
        BreakdownConfig, BreakdownOrchestrator, BreakdownOutcome,
        testing::{HangingCompletionPort, ScriptedCompletionPort},
    },
    quota::{PlanTier, QuotaManager, QuotaStore},
    tasks::BreakdownSource,
};

use crate::{WELL_FORMED_REPLY, checkin, orchestrator_with, quota_record, task};

#[tokio::test]
async fn given_an_exhausted_free_plan_when_requesting_then_denial_comes_without_an_assistant_call() {
    let user = "u1".to_string();
    let completion = Arc::new(ScriptedCompletionPort::always_ok(WELL_FORMED_REPLY));
    let (orchestrator, store) = orchestrator_with(
        &user,
        quota_record(PlanTier::Free, 10, 10),
        completion.clone(),
    )
    .await;

    let outcome = orchestrator
        .request_breakdown(&user, &task(30), Some(&checkin(5, 5)))
        .await
        .expect("denial is a value, not an error");

    let BreakdownOutcome::Declined { denial } = outcome else {
        panic!("expected a declined outcome");
    };
    assert_eq!(denial.tier, PlanTier::Free);
    assert_eq!(denial.remaining, 0);
    assert!(!denial.message.is_empty());
    let lowered = denial.message.to_lowercase();
    assert!(!lowered.contains("quota") && !lowered.contains("limit"));

    assert_eq!(completion.calls(), 0, "no assistant call may be attempted");
    assert_eq!(store.quota(&user).await.expect("record exists").used, 10);
}

#[tokio::test]
async fn given_a_well_formed_reply_when_requesting_then_the_reservation_is_kept() {
    let user = "u1".to_string();
    let completion = Arc::new(ScriptedCompletionPort::always_ok(WELL_FORMED_REPLY));
    let (orchestrator, store) = orchestrator_with(
        &user,
        quota_record(PlanTier::Free, 3, 10),
        completion,
    )
    .await;

    let outcome = orchestrator
        .request_breakdown(&user, &task(30), Some(&checkin(5, 5)))
        .await
        .expect("request succeeds");

    let BreakdownOutcome::Ready { breakdown } = outcome else {
        panic!("expected a ready outcome");
    };
    assert_eq!(breakdown.source, BreakdownSource::Assistant);
    assert!(breakdown.adapted);
    assert_eq!(breakdown.steps.len(), 3);
    assert_eq!(breakdown.total_minutes, 30);

    assert_eq!(
        store.quota(&user).await.expect("record exists").used,
        4,
        "a served request stays counted"
    );
}

#[tokio::test]
async fn given_a_transport_failure_when_requesting_then_fallback_arrives_and_used_is_unchanged() {
    let user = "u1".to_string();
    let (orchestrator, store) = orchestrator_with(
        &user,
        quota_record(PlanTier::Free, 3, 10),
        Arc::new(ScriptedCompletionPort::always_failing()),
    )
    .await;

    let outcome = orchestrator
        .request_breakdown(&user, &task(30), Some(&checkin(2, 2)))
        .await
        .expect("fallback absorbs the failure");

    let BreakdownOutcome::Ready { breakdown } = outcome else {
        panic!("expected a ready outcome");
    };
    assert_eq!(breakdown.source, BreakdownSource::Local);
    assert!(breakdown.adapted);
    assert!(breakdown.encouragement.is_some());
    let total: u32 = breakdown.steps.iter().map(|s| s.minutes as u32).sum();
    assert_eq!(total, 30);

    assert_eq!(
        store.quota(&user).await.expect("record exists").used,
        3,
        "the reservation must be fully released"
    );
}

#[tokio::test]
async fn given_a_malformed_reply_when_requesting_then_fallback_arrives_and_used_is_unchanged() {
    let user = "u1".to_string();
    let (orchestrator, store) = orchestrator_with(
        &user,
        quota_record(PlanTier::Free, 0, 10),
        Arc::new(ScriptedCompletionPort::always_ok(
            "Sure! I'd love to help you with that task.",
        )),
    )
    .await;

    let outcome = orchestrator
        .request_breakdown(&user, &task(40), Some(&checkin(5, 5)))
        .await
        .expect("fallback absorbs the malformed reply");

    let BreakdownOutcome::Ready { breakdown } = outcome else {
        panic!("expected a ready outcome");
    };
    assert_eq!(breakdown.source, BreakdownSource::Local);
    assert_eq!(store.quota(&user).await.expect("record exists").used, 0);
}

#[tokio::test]
async fn given_a_hanging_assistant_when_the_timeout_lapses_then_fallback_arrives() {
    let user = "u1".to_string();
    let store = Arc::new(tidemark_core::quota::InMemoryQuotaStore::default());
    store.seed(&user, quota_record(PlanTier::Free, 2, 10)).await;

    let orchestrator = BreakdownOrchestrator::new(
        QuotaManager::new(store.clone()),
        Arc::new(HangingCompletionPort),
        BreakdownConfig {
            completion_timeout_ms: 50,
            ..BreakdownConfig::default()
        },
    );

    let outcome = orchestrator
        .request_breakdown(&user, &task(30), Some(&checkin(8, 8)))
        .await
        .expect("the timeout resolves into a fallback");

    let BreakdownOutcome::Ready { breakdown } = outcome else {
        panic!("expected a ready outcome");
    };
    assert_eq!(breakdown.source, BreakdownSource::Local);
    assert_eq!(
        store.quota(&user).await.expect("record exists").used,
        2,
        "a timed-out call never counts"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_a_cancelled_request_when_the_future_drops_then_the_reservation_is_released() {
    let user = "u1".to_string();
    let store = Arc::new(tidemark_core::quota::InMemoryQuotaStore::default());
    store.seed(&user, quota_record(PlanTier::Free, 1, 10)).await;

    // Long timeout so the request is still mid-flight when it is cancelled.
    let orchestrator = BreakdownOrchestrator::new(
        QuotaManager::new(store.clone()),
        Arc::new(HangingCompletionPort),
        BreakdownConfig::default(),
    );

    let request = {
        let user = user.clone();
        tokio::spawn(async move {
            orchestrator
                .request_breakdown(&user, &task(30), Some(&checkin(5, 5)))
                .await
        })
    };

    // Let the reservation land, then cancel like a navigation-away would.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(store.quota(&user).await.expect("record exists").used, 2);
    request.abort();

    // The drop guard spawns the undo; give it a beat to run.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(
        store.quota(&user).await.expect("record exists").used,
        1,
        "a charged-but-unused reservation must not leak"
    );
}

#[tokio::test]
async fn given_an_invalid_task_when_requesting_then_no_reservation_is_attempted() {
    let user = "u1".to_string();
    let completion = Arc::new(ScriptedCompletionPort::always_ok(WELL_FORMED_REPLY));
    let (orchestrator, store) = orchestrator_with(
        &user,
        quota_record(PlanTier::Free, 0, 10),
        completion.clone(),
    )
    .await;

    let mut invalid = task(30);
    invalid.complexity = 9;

    orchestrator
        .request_breakdown(&user, &invalid, None)
        .await
        .expect_err("complexity 9 must be rejected at the boundary");

    assert_eq!(completion.calls(), 0);
    assert_eq!(store.quota(&user).await.expect("record exists").used, 0);
}
